use crate::Result as DbErrorResult;

use dl_core::{ProviderId, UserRecord};

use std::collections::BTreeSet;

use log::debug;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct UserRow {
    uid: String,
    display_name: String,
    email: String,
    photo_url: String,
    provider_id: String,
}

/// User profiles in SQLite. `email` is indexed, not unique.
#[derive(Clone)]
pub struct UserRecordRepository {
    pool: SqlitePool,
}

impl UserRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn exists_by_email(&self, email: &str) -> DbErrorResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    pub async fn find_by_uid(&self, uid: &str) -> DbErrorResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
              SELECT uid, display_name, email, photo_url, provider_id
              FROM users
              WHERE uid = ?
              "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Every record carrying `email`; more than one after a signup race.
    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
              SELECT uid, display_name, email, photo_url, provider_id
              FROM users
              WHERE email = ?
              ORDER BY uid ASC
              "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(self.hydrate(row).await?);
        }
        Ok(records)
    }

    /// Records whose search keywords contain `keyword` (lowercased).
    pub async fn search_by_keyword(&self, keyword: &str) -> DbErrorResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
              SELECT u.uid, u.display_name, u.email, u.photo_url, u.provider_id
              FROM users u
              JOIN user_keywords k ON k.uid = u.uid
              WHERE k.keyword = ?
              ORDER BY u.display_name ASC
              "#,
        )
        .bind(keyword.trim().to_lowercase())
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(self.hydrate(row).await?);
        }
        Ok(records)
    }

    /// Write `record` under its uid, replacing any previous record for that uid.
    pub async fn upsert(&self, record: &UserRecord) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
              INSERT INTO users (uid, display_name, email, photo_url, provider_id)
              VALUES (?, ?, ?, ?, ?)
              ON CONFLICT (uid) DO UPDATE SET
                  display_name = excluded.display_name,
                  email = excluded.email,
                  photo_url = excluded.photo_url,
                  provider_id = excluded.provider_id
              "#,
        )
        .bind(&record.uid)
        .bind(&record.display_name)
        .bind(&record.email)
        .bind(&record.photo_url)
        .bind(record.provider_id.as_str())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM user_keywords WHERE uid = ?")
            .bind(&record.uid)
            .execute(&mut *tx)
            .await?;

        for keyword in &record.keywords {
            sqlx::query("INSERT INTO user_keywords (uid, keyword) VALUES (?, ?)")
                .bind(&record.uid)
                .bind(keyword)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(
            "Stored user record uid={} ({} keywords)",
            record.uid,
            record.keywords.len()
        );
        Ok(())
    }

    pub async fn delete(&self, uid: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE uid = ?")
            .bind(uid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn hydrate(&self, row: UserRow) -> DbErrorResult<UserRecord> {
        let keywords: Vec<String> =
            sqlx::query_scalar("SELECT keyword FROM user_keywords WHERE uid = ?")
                .bind(&row.uid)
                .fetch_all(&self.pool)
                .await?;

        Ok(UserRecord {
            display_name: row.display_name,
            email: row.email,
            photo_url: row.photo_url,
            uid: row.uid,
            provider_id: ProviderId::from(row.provider_id),
            keywords: keywords.into_iter().collect::<BTreeSet<_>>(),
        })
    }
}
