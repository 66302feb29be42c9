//! 本地持久化模块
//!
//! 对应浏览器端的 localStorage：一个按字符串键存取字符串值的持久层。
//! 默认实现基于 SQLite（sqlx），测试与无盘场景可使用内存实现。

pub mod dao;
pub mod memory;

use async_trait::async_trait;

pub use dao::SqliteStorage;
pub use memory::MemoryStorage;

/// 持久化存储使用的键
pub mod keys {
    /// 访问令牌（bearer credential）
    pub const ACCESS_TOKEN: &str = "clarity_access_token";
    /// 设备 ID（安装级别唯一标识）
    pub const DEVICE_ID: &str = "clarity_device_id";
}

/// 持久化存储错误
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// 底层数据库错误
    #[error("本地存储数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

/// 本地键值存储接口
///
/// 写入语义为最后写入者获胜，没有事务。
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// 读取键值，不存在时返回 `None`
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入（覆盖）键值
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除键，键不存在时不报错
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// 清空全部键
    async fn clear(&self) -> Result<(), StorageError>;
}
