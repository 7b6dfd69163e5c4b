// src/users/store.rs
//! Persistence contract for user accounts
//!
//! No business logic lives here; the session manager and the user handlers
//! are the only consumers.

use sqlx::SqlitePool;

use super::models::UserAccount;

#[derive(Clone)]
pub struct UserStore {
    db: SqlitePool,
}

impl UserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserAccount>, sqlx::Error> {
        sqlx::query_as::<_, UserAccount>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, sqlx::Error> {
        sqlx::query_as::<_, UserAccount>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Inserts a new account and fetches it back with its generated id.
    pub async fn insert(
        &self,
        name: Option<&str>,
        email: &str,
        password_hash: &str,
    ) -> Result<UserAccount, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();

        sqlx::query_as::<_, UserAccount>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.db)
            .await
    }

    /// Exact-match lookup used as the refresh-token revocation check.
    pub async fn find_by_refresh_token_and_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        sqlx::query_as::<_, UserAccount>(
            "SELECT * FROM users WHERE refresh_token = ? AND email = ?",
        )
        .bind(token)
        .bind(email)
        .fetch_optional(&self.db)
        .await
    }

    /// Overwrites the stored refresh token; `None` clears it (logout). The
    /// single UPDATE is the serialization point for concurrent sessions on
    /// one account - last writer wins.
    pub async fn update_refresh_token(
        &self,
        email: &str,
        token: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET refresh_token = ?, updated_at = datetime('now') WHERE email = ?")
            .bind(token)
            .bind(email)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn update_profile(
        &self,
        id: i64,
        name: Option<&str>,
        age: Option<i64>,
        gender: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE(?, name),
                age = COALESCE(?, age),
                gender = COALESCE(?, gender),
                address = COALESCE(?, address),
                updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(age)
        .bind(gender)
        .bind(address)
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = datetime('now') WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Returns true when a row was actually deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
