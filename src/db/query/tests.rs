//! Unit tests for statement builders.

use super::*;
use crate::db::schema::{Profile, User};
use chrono::TimeZone;

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

// ============================================================================
// Update Builder Tests
// ============================================================================

#[test]
fn test_build_update_with_fields() {
    let id = Uuid::new_v4();
    let mut fields = FieldMap::new();
    fields.insert("first_name".to_string(), SqlValue::text("B"));
    fields.insert("bookmarks".to_string(), SqlValue::text("p1,p2"));

    let statement = build_update::<User>(id, fields, fixed_time()).unwrap();

    // BTreeMap ordering puts bookmarks before first_name.
    assert_eq!(
        statement.sql(),
        "UPDATE users SET bookmarks = $1, first_name = $2, modified_at = $3 \
         WHERE user_id = $4 RETURNING *"
    );
    assert_eq!(
        statement.params(),
        &[
            SqlValue::text("p1,p2"),
            SqlValue::text("B"),
            SqlValue::Timestamp(fixed_time()),
            SqlValue::Uuid(id),
        ]
    );
}

#[test]
fn test_build_update_empty_fields_only_touches_modified_at() {
    let id = Uuid::new_v4();

    let statement = build_update::<User>(id, FieldMap::new(), fixed_time()).unwrap();

    assert_eq!(
        statement.sql(),
        "UPDATE users SET modified_at = $1 WHERE user_id = $2 RETURNING *"
    );
    assert_eq!(statement.params().len(), 2);
}

#[test]
fn test_build_update_rejects_unknown_column() {
    let mut fields = FieldMap::new();
    fields.insert("first_name".to_string(), SqlValue::text("A"));
    fields.insert(
        "first_name = 'x'; DROP TABLE users; --".to_string(),
        SqlValue::text("B"),
    );

    let err = build_update::<User>(Uuid::new_v4(), fields, fixed_time()).unwrap_err();

    match err {
        DbError::UnknownColumn { table, column } => {
            assert_eq!(table, "users");
            assert!(column.contains("DROP TABLE"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_build_update_rejects_identity_and_timestamp_columns() {
    for column in ["user_id", "created_at", "modified_at"] {
        let mut fields = FieldMap::new();
        fields.insert(column.to_string(), SqlValue::text("x"));

        let result = build_update::<User>(Uuid::new_v4(), fields, fixed_time());
        assert!(
            matches!(result, Err(DbError::UnknownColumn { .. })),
            "{column} must not be updatable"
        );
    }
}

#[test]
fn test_build_update_profile_allow_list() {
    let mut fields = FieldMap::new();
    fields.insert("is_verified".to_string(), SqlValue::Bool(true));

    let statement = build_update::<Profile>(Uuid::new_v4(), fields, fixed_time()).unwrap();
    assert!(statement.sql().starts_with("UPDATE profiles SET is_verified = $1"));
    assert!(statement.sql().ends_with("WHERE profile_id = $3 RETURNING *"));

    let mut owner_change = FieldMap::new();
    owner_change.insert("user_id".to_string(), SqlValue::Uuid(Uuid::new_v4()));
    assert!(build_update::<Profile>(Uuid::new_v4(), owner_change, fixed_time()).is_err());
}

// ============================================================================
// Insert Builder Tests
// ============================================================================

#[test]
fn test_build_insert() {
    let id = Uuid::new_v4();
    let statement = build_insert::<User>(vec![
        ("user_id", SqlValue::Uuid(id)),
        ("email_id", SqlValue::text("a@b.com")),
        ("created_at", SqlValue::Timestamp(fixed_time())),
    ])
    .unwrap();

    assert_eq!(
        statement.sql(),
        "INSERT INTO users (user_id, email_id, created_at) VALUES ($1, $2, $3) RETURNING *"
    );
    assert_eq!(statement.params()[0], SqlValue::Uuid(id));
}

#[test]
fn test_build_insert_rejects_unknown_column() {
    let result = build_insert::<Profile>(vec![("is_admin", SqlValue::Bool(true))]);
    assert!(matches!(result, Err(DbError::UnknownColumn { table: "profiles", .. })));
}

// ============================================================================
// Select / Delete Builder Tests
// ============================================================================

#[test]
fn test_select_by_id() {
    let id = Uuid::new_v4();
    let statement = select_by_id::<Profile>(id);

    assert_eq!(
        statement.sql(),
        "SELECT * FROM profiles WHERE profile_id = $1"
    );
    assert_eq!(statement.params(), &[SqlValue::Uuid(id)]);
}

#[test]
fn test_select_all_orders_newest_first() {
    let statement = select_all::<User>(None);

    assert_eq!(
        statement.sql(),
        "SELECT * FROM users ORDER BY created_at DESC, user_id DESC"
    );
    assert!(statement.params().is_empty());
}

#[test]
fn test_select_all_with_limit() {
    let statement = select_all::<Profile>(Some(10));

    assert!(statement.sql().ends_with("LIMIT $1"));
    assert_eq!(statement.params(), &[SqlValue::BigInt(10)]);
}

#[test]
fn test_build_delete() {
    let id = Uuid::new_v4();
    let statement = build_delete::<User>(id);

    assert_eq!(statement.sql(), "DELETE FROM users WHERE user_id = $1");
    assert_eq!(statement.params(), &[SqlValue::Uuid(id)]);
}

// ============================================================================
// Entity Metadata Tests
// ============================================================================

#[test]
fn test_mutable_columns_are_insertable() {
    for column in User::MUTABLE_COLUMNS {
        assert!(User::INSERT_COLUMNS.contains(&column.name));
    }
    for column in Profile::MUTABLE_COLUMNS {
        assert!(Profile::INSERT_COLUMNS.contains(&column.name));
    }
}

#[test]
fn test_mutable_column_lookup() {
    assert_eq!(
        User::mutable_column("email_id").map(|c| c.kind),
        Some(ColumnKind::Email)
    );
    assert!(User::mutable_column("user_id").is_none());
}

#[test]
fn test_sql_value_conversions() {
    assert_eq!(SqlValue::from("x".to_string()), SqlValue::text("x"));
    assert_eq!(SqlValue::from(None::<String>), SqlValue::Text(None));
    assert_eq!(SqlValue::from(true), SqlValue::Bool(true));
    assert_eq!(SqlValue::from(5_i64), SqlValue::BigInt(5));
}
