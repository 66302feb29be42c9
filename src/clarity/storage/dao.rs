//! 本地存储数据访问层（DAO）
//!
//! 基于 sqlx / SQLite 的键值表 `local_storage`，表结构由 `migrations/` 管理。

use super::{LocalStorage, StorageError};
use crate::clarity::db::create_sqlite_pool_with_migration;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};
use tracing::debug;

/// SQLite 键值存储
#[derive(Clone)]
pub struct SqliteStorage {
    pool: Pool<Sqlite>,
}

impl SqliteStorage {
    /// 使用已有连接池创建（调用方负责执行迁移）
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// 连接数据库并执行迁移
    ///
    /// `db_url` 例如 `sqlite://clarity.db?mode=rwc` 或 `sqlite::memory:`
    pub async fn connect(db_url: &str) -> Result<Self> {
        let pool = create_sqlite_pool_with_migration(db_url).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl LocalStorage for SqliteStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO local_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;
        debug!("[Storage] 写入键: {}", key);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        debug!("[Storage] 删除键: {}", key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM local_storage")
            .execute(&self.pool)
            .await?;
        debug!("[Storage] 清空本地存储，共删除 {} 个键", result.rows_affected());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open(dir: &tempfile::TempDir) -> SqliteStorage {
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("storage.db").display());
        SqliteStorage::connect(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = open(&dir).await;
            storage.set_item("clarity_device_id", "abc").await.unwrap();
            storage.set_item("clarity_device_id", "def").await.unwrap();
        }

        let storage = open(&dir).await;
        assert_eq!(
            storage.get_item("clarity_device_id").await.unwrap().as_deref(),
            Some("def")
        );
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let storage = SqliteStorage::connect("sqlite::memory:").await.unwrap();
        storage.set_item("a", "1").await.unwrap();
        storage.set_item("b", "2").await.unwrap();

        storage.remove_item("a").await.unwrap();
        assert_eq!(storage.get_item("a").await.unwrap(), None);
        assert_eq!(storage.get_item("b").await.unwrap().as_deref(), Some("2"));

        storage.clear().await.unwrap();
        assert_eq!(storage.get_item("b").await.unwrap(), None);
    }
}
