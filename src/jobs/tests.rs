//! Tests for jobs module
//!
//! These tests verify job persistence and listing behavior including:
//! - Row mapping and the active/status pairing
//! - Name, location, and active filters
//! - Pagination metadata

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;

    use super::super::models::{status_for, Job};
    use crate::common::migrations::run_migrations;
    use crate::common::PaginationMeta;

    async fn setup() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        run_migrations(&pool).await.expect("Failed to run migrations");
        pool
    }

    async fn insert_job(pool: &SqlitePool, name: &str, location: Option<&str>, active: bool) -> i64 {
        sqlx::query(
            r#"
            INSERT INTO jobs (name, location, active, status, created_by)
            VALUES (?, ?, ?, ?, 'seed@example.com')
            "#,
        )
        .bind(name)
        .bind(location)
        .bind(active)
        .bind(status_for(active))
        .execute(pool)
        .await
        .expect("Failed to insert job")
        .last_insert_rowid()
    }

    #[test]
    fn test_status_mirrors_active_flag() {
        assert_eq!(status_for(true), "ACTIVE");
        assert_eq!(status_for(false), "INACTIVE");
    }

    #[tokio::test]
    async fn test_job_row_mapping() {
        let pool = setup().await;
        let id = insert_job(&pool, "Backend Engineer", Some("Hanoi"), true).await;

        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .expect("Inserted job should load");

        assert_eq!(job.name, "Backend Engineer");
        assert_eq!(job.location, Some("Hanoi".to_string()));
        assert!(job.active);
        assert_eq!(job.status, "ACTIVE");
        assert_eq!(job.created_by, Some("seed@example.com".to_string()));
        assert!(job.created_at.is_some());
        assert!(job.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_listing_filters() {
        let pool = setup().await;
        insert_job(&pool, "Backend Engineer", Some("Hanoi"), true).await;
        insert_job(&pool, "Frontend Engineer", Some("Saigon"), true).await;
        insert_job(&pool, "Backend Intern", None, false).await;

        // Same query shape the list handler uses.
        let filtered = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE name LIKE ?
              AND IFNULL(location, '') LIKE ?
              AND (? IS NULL OR active = ?)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind("%Backend%")
        .bind("%")
        .bind(Some(true))
        .bind(Some(true))
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Backend Engineer");

        // NULL locations must not be dropped when the filter is absent.
        let all: Vec<Job> = sqlx::query_as(
            r#"
            SELECT * FROM jobs
            WHERE name LIKE ?
              AND IFNULL(location, '') LIKE ?
              AND (? IS NULL OR active = ?)
            "#,
        )
        .bind("%")
        .bind("%")
        .bind(None::<bool>)
        .bind(None::<bool>)
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_listing_page_window() {
        let pool = setup().await;
        for i in 0..5 {
            insert_job(&pool, &format!("Job {}", i), None, true).await;
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&pool)
            .await
            .unwrap();
        let meta = PaginationMeta::new(2, 2, total);
        assert_eq!(meta.pages, 3);

        let page: Vec<Job> = sqlx::query_as(
            "SELECT * FROM jobs ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(2i64)
        .bind(2i64)
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Job 2");
        assert_eq!(page[1].name, "Job 1");
    }
}
