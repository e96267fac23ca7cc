//! User CRUD tests.

use heartbridge_client::{CreateUserRequest, Error};
use heartbridge_tests::{create_test_client, sample_user};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running server; set API_BASE_URL"]
async fn test_user_lifecycle() {
    let client = create_test_client().expect("Failed to create client");

    // Create
    let created = client
        .create_user(&sample_user("A"))
        .await
        .expect("Failed to create user");
    assert_eq!(created.first_name.as_deref(), Some("A"));

    // Get returns the identical row
    let fetched = client
        .get_user(created.user_id)
        .await
        .expect("Failed to get user");
    assert_eq!(fetched, created);

    // Listed
    let list = client.list_users().await.expect("Failed to list users");
    assert_eq!(list.count, list.users.len());
    assert!(list.users.iter().any(|u| u.user_id == created.user_id));

    // Update one field
    let updated = client
        .update_user(created.user_id, &json!({ "first_name": "B" }))
        .await
        .expect("Failed to update user");
    assert_eq!(updated.first_name.as_deref(), Some("B"));
    assert_eq!(updated.email_id, created.email_id);
    assert!(updated.modified_at > updated.created_at);

    // Delete
    let deleted = client
        .delete_user(created.user_id)
        .await
        .expect("Failed to delete user");
    assert_eq!(deleted.message, "User deleted successfully");

    let gone = client.get_user(created.user_id).await;
    assert!(matches!(gone, Err(Error::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running server; set API_BASE_URL"]
async fn test_invalid_email_rejected() {
    let client = create_test_client().expect("Failed to create client");

    let result = client
        .create_user(&CreateUserRequest {
            email_id: Some("not-an-email".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
#[ignore = "requires a running server; set API_BASE_URL"]
async fn test_duplicate_email_conflicts() {
    let client = create_test_client().expect("Failed to create client");
    let request = sample_user("A");

    let first = client
        .create_user(&request)
        .await
        .expect("Failed to create user");
    let second = client.create_user(&request).await;

    assert!(matches!(second, Err(Error::Api { status: 409, .. })));

    client
        .delete_user(first.user_id)
        .await
        .expect("Failed to delete user");
}

#[tokio::test]
#[ignore = "requires a running server; set API_BASE_URL"]
async fn test_update_rejects_unknown_field() {
    let client = create_test_client().expect("Failed to create client");
    let user = client
        .create_user(&sample_user("A"))
        .await
        .expect("Failed to create user");

    let result = client
        .update_user(user.user_id, &json!({ "user_id": Uuid::new_v4() }))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let unchanged = client
        .get_user(user.user_id)
        .await
        .expect("Failed to get user");
    assert_eq!(unchanged, user);

    client
        .delete_user(user.user_id)
        .await
        .expect("Failed to delete user");
}

#[tokio::test]
#[ignore = "requires a running server; set API_BASE_URL"]
async fn test_missing_user_not_found() {
    let client = create_test_client().expect("Failed to create client");
    let missing = Uuid::new_v4();

    assert!(matches!(
        client.get_user(missing).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        client.update_user(missing, &json!({ "first_name": "B" })).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        client.delete_user(missing).await,
        Err(Error::NotFound(_))
    ));
}
