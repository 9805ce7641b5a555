//! In-memory repository implementations
//!
//! `MemoryStore` keeps every table behind one `parking_lot::RwLock`, so a
//! cascade or a row-plus-history write is atomic just like the PostgreSQL
//! transaction it stands in for. Uniqueness, cascade and ordering rules match
//! the `Pg*Repository` types; ids are assigned from per-table sequences
//! starting at 1.

mod groups;
mod roles;
mod users;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;

use auth_core::entities::{Group, GroupRole, Role, User, UserHistoryEntry};

pub use groups::{MemoryGroupRepository, MemoryMembershipRepository};
pub use roles::{MemoryGroupRoleRepository, MemoryRoleRepository};
pub use users::{MemoryUserHistoryRepository, MemoryUserRepository};

/// Monotonic id source for one table
#[derive(Debug)]
pub(crate) struct Sequence(i64);

impl Default for Sequence {
    fn default() -> Self {
        Self(1)
    }
}

impl Sequence {
    pub(crate) fn next(&mut self) -> i64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StoredUser {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

/// All tables of the store
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) users: BTreeMap<i64, StoredUser>,
    pub(crate) roles: BTreeMap<i64, Role>,
    pub(crate) groups: BTreeMap<i64, Group>,
    pub(crate) group_roles: BTreeMap<i64, GroupRole>,
    /// (user_id, group_id)
    pub(crate) memberships: BTreeSet<(i64, i64)>,
    pub(crate) history: Vec<UserHistoryEntry>,
    pub(crate) user_seq: Sequence,
    pub(crate) role_seq: Sequence,
    pub(crate) group_seq: Sequence,
    pub(crate) group_role_seq: Sequence,
    pub(crate) history_seq: Sequence,
}

pub(crate) type SharedState = Arc<RwLock<MemoryState>>;

/// Shared in-memory backing store
///
/// Cloning the store, or any repository handed out by it, shares the same
/// tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: SharedState,
}

impl MemoryStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repository(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(Arc::clone(&self.state))
    }

    pub fn user_history_repository(&self) -> MemoryUserHistoryRepository {
        MemoryUserHistoryRepository::new(Arc::clone(&self.state))
    }

    pub fn role_repository(&self) -> MemoryRoleRepository {
        MemoryRoleRepository::new(Arc::clone(&self.state))
    }

    pub fn group_repository(&self) -> MemoryGroupRepository {
        MemoryGroupRepository::new(Arc::clone(&self.state))
    }

    pub fn group_role_repository(&self) -> MemoryGroupRoleRepository {
        MemoryGroupRoleRepository::new(Arc::clone(&self.state))
    }

    pub fn membership_repository(&self) -> MemoryMembershipRepository {
        MemoryMembershipRepository::new(Arc::clone(&self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut seq = Sequence::default();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
    }

    #[test]
    fn test_clones_share_tables() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.state.write().role_seq.next();
        assert_eq!(store.state.write().role_seq.next(), 2);
    }
}
