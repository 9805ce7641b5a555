//! Seed routine behaviour against the in-memory store

use auth_common::AssociationPolicy;
use auth_core::entities::GroupRole;
use auth_db::MemoryStore;
use auth_service::{
    GroupService, RoleService, SeedOptions, SeedRoutine, SeedStage, ServiceContext, UserService,
};

fn context() -> ServiceContext {
    ServiceContext::in_memory(&MemoryStore::new())
}

async fn labels(ctx: &ServiceContext) -> Vec<String> {
    let groups = GroupService::new(ctx);
    let mut out = Vec::new();
    for link in groups.associations().await.unwrap() {
        out.push(groups.describe(&link).await.unwrap());
    }
    out
}

#[tokio::test]
async fn seed_on_empty_store_creates_everything() {
    let ctx = context();

    let report = SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();

    assert_eq!(report.roles_created.len(), 2);
    assert_eq!(report.groups_created.len(), 2);
    assert_eq!(report.associations_created.len(), 2);
    assert_eq!(report.users_created.len(), 2);
    assert_eq!(report.memberships_added.len(), 2);
    assert!(report.roles_existing.is_empty());

    assert_eq!(ctx.role_repo().count().await.unwrap(), 2);
    assert_eq!(ctx.group_repo().count().await.unwrap(), 2);
    assert_eq!(ctx.group_role_repo().count().await.unwrap(), 2);
    assert_eq!(ctx.user_repo().count().await.unwrap(), 2);
    assert_eq!(labels(&ctx).await, vec!["admin_group - admin", "user_group - user"]);

    let admin_role = RoleService::new(&ctx).find_by_name("admin").await.unwrap().unwrap();
    assert_eq!(admin_role.description, "Administrator");
    let user_role = RoleService::new(&ctx).find_by_name("user").await.unwrap().unwrap();
    assert_eq!(user_role.description, "Regular User");
}

#[tokio::test]
async fn seeded_users_are_regular_and_grouped() {
    let ctx = context();
    SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();
    let users = UserService::new(&ctx);

    let admin = users.find_by_username("admin").await.unwrap().unwrap();
    assert_eq!(admin.email, "admin@admin.com");
    assert_eq!(admin.to_string(), "Arthur Negreiros");
    assert!(admin.is_active);
    assert!(!admin.is_staff);
    assert!(!admin.is_superuser);

    let user = users.find_by_username("user").await.unwrap().unwrap();
    assert_eq!(user.to_string(), "Regular User");

    let admin_groups: Vec<_> = users.groups_of(admin.id).await.unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(admin_groups, vec!["admin_group"]);
    let user_groups: Vec<_> = users.groups_of(user.id).await.unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(user_groups, vec!["user_group"]);

    let admin_roles: Vec<_> = users.roles_of(admin.id).await.unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(admin_roles, vec!["admin"]);

    // No password configured: nothing verifies.
    assert!(!users.check_password("admin", "").await.unwrap());
    assert!(!users.check_password("admin", "admin").await.unwrap());
}

#[tokio::test]
async fn configured_passwords_are_usable() {
    let ctx = context();
    let options = SeedOptions {
        admin_password: Some("admin-secret".to_string()),
        ..Default::default()
    };
    SeedRoutine::new(&ctx, options).run().await.unwrap();
    let users = UserService::new(&ctx);

    assert!(users.check_password("admin", "admin-secret").await.unwrap());
    assert!(!users.check_password("user", "admin-secret").await.unwrap());
}

#[tokio::test]
async fn second_run_fails_on_admin_without_duplicating() {
    let ctx = context();
    SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();

    let failure = SeedRoutine::new(&ctx, SeedOptions::default())
        .run()
        .await
        .unwrap_err();

    assert_eq!(failure.stage, SeedStage::Users);
    assert!(failure.source.is_duplicate_of("User", "username"));
    assert!(failure.to_string().contains("'admin'"));
    assert!(failure.partial.roles_created.is_empty());
    assert_eq!(failure.partial.roles_existing.len(), 2);
    assert_eq!(failure.partial.groups_existing.len(), 2);
    assert!(failure.partial.associations_created.is_empty());

    assert_eq!(ctx.role_repo().count().await.unwrap(), 2);
    assert_eq!(ctx.group_repo().count().await.unwrap(), 2);
    assert_eq!(ctx.group_role_repo().count().await.unwrap(), 2);
    assert_eq!(ctx.user_repo().count().await.unwrap(), 2);
}

#[tokio::test]
async fn partially_seeded_store_gets_no_association() {
    let ctx = context();
    // The role exists beforehand, so only the group is new.
    RoleService::new(&ctx).create_role("admin", "Preexisting").await.unwrap();

    let report = SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();

    assert_eq!(report.roles_existing.len(), 1);
    assert_eq!(report.associations_created.len(), 1);
    assert_eq!(labels(&ctx).await, vec!["user_group - user"]);

    let admin = RoleService::new(&ctx).find_by_name("admin").await.unwrap().unwrap();
    assert_eq!(admin.description, "Preexisting");
}

async fn remove_admin_link(ctx: &ServiceContext) {
    let groups = GroupService::new(ctx);
    let admin_group = groups.find_by_name("admin_group").await.unwrap().unwrap();
    let admin_role = RoleService::new(ctx).find_by_name("admin").await.unwrap().unwrap();

    let links: Vec<GroupRole> = ctx.group_role_repo().find_by_group(admin_group.id).await.unwrap();
    for link in links.iter().filter(|l| l.links(admin_group.id, admin_role.id)) {
        groups.unassign(link.id).await.unwrap();
    }
}

#[tokio::test]
async fn default_policy_does_not_restore_removed_link() {
    let ctx = context();
    SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();
    remove_admin_link(&ctx).await;

    // Users already exist, so the run fails after the association step.
    let failure = SeedRoutine::new(&ctx, SeedOptions::default())
        .run()
        .await
        .unwrap_err();

    assert_eq!(failure.stage, SeedStage::Users);
    assert!(failure.partial.associations_created.is_empty());
    assert_eq!(labels(&ctx).await, vec!["user_group - user"]);
}

#[tokio::test]
async fn ensure_exists_policy_restores_removed_link() {
    let ctx = context();
    SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();
    remove_admin_link(&ctx).await;

    let options = SeedOptions {
        association_policy: AssociationPolicy::EnsureExists,
        ..Default::default()
    };
    let failure = SeedRoutine::new(&ctx, options).run().await.unwrap_err();

    assert_eq!(failure.stage, SeedStage::Users);
    assert_eq!(failure.partial.associations_created.len(), 1);
    assert_eq!(ctx.group_role_repo().count().await.unwrap(), 2);

    let mut current = labels(&ctx).await;
    current.sort();
    assert_eq!(current, vec!["admin_group - admin", "user_group - user"]);
}

#[tokio::test]
async fn ensure_exists_on_empty_store_matches_default() {
    let ctx = context();
    let options = SeedOptions {
        association_policy: AssociationPolicy::EnsureExists,
        ..Default::default()
    };

    let report = SeedRoutine::new(&ctx, options).run().await.unwrap();

    assert_eq!(report.associations_created.len(), 2);
    assert!(!report.is_noop());
}

#[tokio::test]
async fn role_deletion_cascades_after_seed() {
    let ctx = context();
    SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();
    let roles = RoleService::new(&ctx);
    let groups = GroupService::new(&ctx);

    let admin = roles.find_by_name("admin").await.unwrap().unwrap();
    roles.delete_role(admin.id).await.unwrap();

    assert_eq!(labels(&ctx).await, vec!["user_group - user"]);
    assert!(groups.find_by_name("admin_group").await.unwrap().is_some());

    let admin_user = UserService::new(&ctx).find_by_username("admin").await.unwrap().unwrap();
    assert!(UserService::new(&ctx).roles_of(admin_user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn every_seeded_user_has_one_history_entry() {
    let ctx = context();
    let report = SeedRoutine::new(&ctx, SeedOptions::default()).run().await.unwrap();
    let users = UserService::new(&ctx);

    for user in &report.users_created {
        let history = users.history(user.id).await.unwrap();
        assert_eq!(history.len(), 1, "user {}", user.username);
    }
}
