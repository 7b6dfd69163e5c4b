//! Tests for users module
//!
//! These tests verify the user store contract including:
//! - Account insertion and lookup
//! - Refresh-token exact-match lookup and overwrite
//! - Profile updates and deletion
//! - Sensitive fields never serializing

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;

    use super::super::models::UserAccount;
    use super::super::store::UserStore;
    use crate::common::migrations::run_migrations;

    async fn setup() -> UserStore {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        run_migrations(&pool).await.expect("Failed to run migrations");
        UserStore::new(pool)
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_round_trips() {
        let store = setup().await;

        let account = store
            .insert(Some("Alice"), "alice@example.com", "$2b$04$hash")
            .await
            .expect("Insert should succeed");

        assert!(account.id > 0);
        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.name, Some("Alice".to_string()));
        assert!(account.refresh_token.is_none());

        let fetched = store
            .find_by_id(account.id)
            .await
            .unwrap()
            .expect("Inserted account should be findable");
        assert_eq!(fetched.email, account.email);
    }

    #[tokio::test]
    async fn test_email_exists() {
        let store = setup().await;

        assert!(!store.email_exists("bob@example.com").await.unwrap());
        store
            .insert(None, "bob@example.com", "hash")
            .await
            .unwrap();
        assert!(store.email_exists("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_token_lookup_requires_exact_match() {
        let store = setup().await;

        store
            .insert(None, "carol@example.com", "hash")
            .await
            .unwrap();
        store
            .update_refresh_token("carol@example.com", Some("token-a"))
            .await
            .unwrap();

        let hit = store
            .find_by_refresh_token_and_email("token-a", "carol@example.com")
            .await
            .unwrap();
        assert!(hit.is_some());

        // Either field off by one character misses.
        assert!(store
            .find_by_refresh_token_and_email("token-b", "carol@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_refresh_token_and_email("token-a", "other@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_refresh_token_overwrites_and_clears() {
        let store = setup().await;

        store
            .insert(None, "dave@example.com", "hash")
            .await
            .unwrap();

        store
            .update_refresh_token("dave@example.com", Some("first"))
            .await
            .unwrap();
        store
            .update_refresh_token("dave@example.com", Some("second"))
            .await
            .unwrap();

        // Overwriting revokes the earlier value.
        assert!(store
            .find_by_refresh_token_and_email("first", "dave@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_refresh_token_and_email("second", "dave@example.com")
            .await
            .unwrap()
            .is_some());

        store
            .update_refresh_token("dave@example.com", None)
            .await
            .unwrap();
        let account = store.find_by_email("dave@example.com").await.unwrap().unwrap();
        assert!(account.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_merges_fields() {
        let store = setup().await;

        let account = store
            .insert(Some("Eve"), "eve@example.com", "hash")
            .await
            .unwrap();

        let updated = store
            .update_profile(account.id, None, Some(30), None, Some("Hanoi"))
            .await
            .unwrap()
            .expect("Update of existing account should return it");

        // Unset fields keep their previous values.
        assert_eq!(updated.name, Some("Eve".to_string()));
        assert_eq!(updated.age, Some(30));
        assert_eq!(updated.address, Some("Hanoi".to_string()));

        let missing = store
            .update_profile(9999, Some("Nobody"), None, None, None)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let store = setup().await;

        let account = store
            .insert(None, "frank@example.com", "hash")
            .await
            .unwrap();

        assert!(store.delete(account.id).await.unwrap());
        assert!(!store.delete(account.id).await.unwrap());
        assert!(store.find_by_id(account.id).await.unwrap().is_none());
    }

    #[test]
    fn test_sensitive_fields_never_serialize() {
        let account = UserAccount {
            id: 1,
            name: Some("Grace".to_string()),
            email: "grace@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            age: None,
            gender: None,
            address: None,
            refresh_token: Some("live-token".to_string()),
            created_at: Some("2026-01-01 00:00:00".to_string()),
            updated_at: None,
        };

        let json = serde_json::to_string(&account).expect("Serialization should succeed");
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("refresh_token"));
        assert!(!json.contains("live-token"));
        assert!(json.contains("grace@example.com"));
    }
}
