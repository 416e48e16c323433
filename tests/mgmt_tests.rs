//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
// Live-server integration tests. These need a running MarkLogic server
// and are skipped unless MARKLOGIC_HOST is set, for example:
//
//   MARKLOGIC_HOST=localhost MARKLOGIC_USER=admin MARKLOGIC_PASSWORD=admin \
//     cargo test --test mgmt_tests

use marklogic_mgmt_rust_sdk::types::ScalarType;
use marklogic_mgmt_rust_sdk::Database;
use marklogic_mgmt_rust_sdk::ElementRangeIndex;
use marklogic_mgmt_rust_sdk::Forest;
use marklogic_mgmt_rust_sdk::Handle;
use marklogic_mgmt_rust_sdk::HandleBuilder;
use marklogic_mgmt_rust_sdk::MgmtError;
use marklogic_mgmt_rust_sdk::Role;
use marklogic_mgmt_rust_sdk::SimpleDatabase;
use marklogic_mgmt_rust_sdk::User;

use std::error::Error;
use std::time::Duration;

fn live_server_configured() -> bool {
    std::env::var("MARKLOGIC_HOST").is_ok()
}

fn get_builder() -> Result<HandleBuilder, MgmtError> {
    Handle::builder()
        .timeout(Duration::from_secs(30))?
        // this will override any defaults above
        .from_environment()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn smoke_test() -> Result<(), Box<dyn Error>> {
    if !live_server_configured() {
        return Ok(());
    }
    // Set up a tracing subscriber to see output based on RUST_LOG environment setting
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_ansi(false)
        .compact()
        .init();

    let handle = get_builder()?.build()?;

    let db = Database::new("sdk_test_db")
        .add_index(ElementRangeIndex::new("order-id", ScalarType::Int));
    db.create(&handle).await?;

    let found = Database::lookup("sdk_test_db", &handle).await?;
    let found = found.ok_or("created database not found")?;
    assert_eq!(found.database_name(), "sdk_test_db");
    assert_eq!(found.element_range_indexes().len(), 1);

    let forest = Forest::lookup("sdk_test_db-Forest-001", &handle).await?;
    assert!(forest.is_some(), "default forest was not created");

    // change a property and write it back
    let mut found = found;
    found.set_reindexer_throttle(3)?;
    found.save(&handle).await?;
    let again = Database::lookup("sdk_test_db", &handle)
        .await?
        .ok_or("saved database not found")?;
    assert_eq!(again.reindexer_throttle(), Some(3));

    db.remove(&handle).await?;
    assert!(Database::lookup("sdk_test_db", &handle).await?.is_none());
    assert!(Forest::lookup("sdk_test_db-Forest-001", &handle)
        .await?
        .is_none());

    Ok(())
}

#[tokio::test]
async fn security_round_trip() -> Result<(), Box<dyn Error>> {
    if !live_server_configured() {
        return Ok(());
    }
    let handle = get_builder()?.build()?;

    let role = Role::new("sdk_test_role")
        .set_description("Role created by integration tests")
        .add_parent_role("rest-reader");
    role.create(&handle).await?;

    let user = User::new("sdk_test_user")
        .set_password("test-password-1")
        .add_role_name("sdk_test_role");
    user.create(&handle).await?;

    let found = User::lookup("sdk_test_user", &handle)
        .await?
        .ok_or("created user not found")?;
    assert!(found.role_names().contains(&"sdk_test_role".to_string()));

    let all_roles = Role::list(&handle).await?;
    assert!(all_roles.iter().any(|r| r.name() == "sdk_test_role"));

    user.remove(&handle).await?;
    role.remove(&handle).await?;
    assert!(User::lookup("sdk_test_user", &handle).await?.is_none());
    assert!(Role::lookup("sdk_test_role", &handle).await?.is_none());

    // removing again is benign
    role.remove(&handle).await?;

    Ok(())
}

#[tokio::test]
async fn quickstart_round_trip() -> Result<(), Box<dyn Error>> {
    if !live_server_configured() {
        return Ok(());
    }
    let handle = get_builder()?.build()?;

    let recipe = SimpleDatabase::new("sdk_test_app", 8101).forests(1);
    let parts = recipe.create(&handle, handle.host()).await?;
    assert_eq!(parts.content.database_name(), "sdk_test_app_db");
    assert_eq!(parts.modules.database_name(), "sdk_test_app_modules_db");
    assert_eq!(parts.server.name(), "sdk_test_app_http_8101");

    recipe.destroy(&handle).await?;
    assert!(Database::lookup("sdk_test_app_db", &handle).await?.is_none());

    Ok(())
}
