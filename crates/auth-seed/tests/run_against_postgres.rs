//! End-to-end seed run against PostgreSQL
//!
//! Skipped unless DATABASE_URL is set. The database may already hold the
//! seeded accounts from an earlier run, in which case the run must stop at
//! the user step without touching roles or groups.

use auth_common::AppConfig;
use auth_seed::{run, SeedError};
use auth_service::SeedStage;

fn config_from_env() -> Option<AppConfig> {
    let database_url = std::env::var("DATABASE_URL").ok()?;
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "SEED_APPLY_SCHEMA" => Some("true".to_string()),
        _ => None,
    })
    .ok()
}

#[tokio::test]
async fn test_seed_run_is_safe_to_repeat() {
    let Some(config) = config_from_env() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    match run(&config).await {
        Ok(report) => {
            assert_eq!(report.users_created.len(), 2);
            assert_eq!(report.memberships_added.len(), 2);
        }
        Err(SeedError::Seed(failure)) => {
            assert_eq!(failure.stage, SeedStage::Users);
            assert!(failure.source.is_duplicate_of("User", "username"));
            assert!(failure.partial.roles_created.is_empty());
            assert!(failure.partial.groups_created.is_empty());
        }
        Err(other) => panic!("unexpected failure: {other}"),
    }

    // Whatever happened above, a further run always hits the existing admin.
    let Err(SeedError::Seed(failure)) = run(&config).await else {
        panic!("repeated seed run should fail");
    };
    assert_eq!(failure.stage, SeedStage::Users);
}
