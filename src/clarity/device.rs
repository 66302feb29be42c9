//! 设备与网络状态辅助函数
//!
//! - 设备 ID：首次访问时生成并持久化，之后保持不变
//! - 在线状态：读取宿主提供的网络状态，不做缓存
//! - 同步状态：由“是否配置同步服务”和“是否在线”推导

use crate::clarity::storage::{keys, LocalStorage, StorageError};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;
use uuid::Uuid;

/// 读取或生成设备 ID
///
/// 首次调用生成随机 UUID 并写入 `clarity_device_id`，之后直接返回已保存的值。
pub async fn get_device_id(storage: &dyn LocalStorage) -> Result<String, StorageError> {
    if let Some(device_id) = storage.get_item(keys::DEVICE_ID).await? {
        if !device_id.is_empty() {
            return Ok(device_id);
        }
    }

    let device_id = Uuid::new_v4().to_string();
    storage.set_item(keys::DEVICE_ID, &device_id).await?;
    info!("[Device] 🆔 生成新的设备ID: {}", device_id);
    Ok(device_id)
}

/// 网络连通性探测
pub trait Connectivity: Send + Sync {
    /// 当前是否在线，每次调用都读取最新状态
    fn is_online(&self) -> bool;
}

/// 由宿主维护的在线标志（对应浏览器的 online/offline 事件）
#[derive(Debug)]
pub struct NetworkStatus {
    online: AtomicBool,
}

impl NetworkStatus {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    /// 宿主在网络状态变化时调用
    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            info!(
                "[Device] 🌐 网络状态变化: {}",
                if online { "在线" } else { "离线" }
            );
        }
    }
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for NetworkStatus {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// 同步状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    /// 未配置同步服务
    LocalOnly,
    /// 已配置但当前离线
    Offline,
    /// 已配置且在线
    Online,
}

impl SyncStatus {
    /// 是否启用了同步
    pub fn enabled(self) -> bool {
        !matches!(self, Self::LocalOnly)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LocalOnly => "Local Only",
            Self::Offline => "Offline",
            Self::Online => "Online",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::LocalOnly => "💾",
            Self::Offline => "📴",
            Self::Online => "☁️",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 根据同步开关与在线状态推导同步状态
pub fn sync_status(sync_enabled: bool, online: bool) -> SyncStatus {
    match (sync_enabled, online) {
        (false, _) => SyncStatus::LocalOnly,
        (true, false) => SyncStatus::Offline,
        (true, true) => SyncStatus::Online,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clarity::storage::MemoryStorage;

    #[tokio::test]
    async fn test_device_id_is_stable() {
        let storage = MemoryStorage::new();
        let first = get_device_id(&storage).await.unwrap();
        let second = get_device_id(&storage).await.unwrap();
        assert_eq!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(
            storage.get_item(keys::DEVICE_ID).await.unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[tokio::test]
    async fn test_existing_device_id_is_kept() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::DEVICE_ID, "device-1").await.unwrap();
        assert_eq!(get_device_id(&storage).await.unwrap(), "device-1");
    }

    #[test]
    fn test_sync_status_mapping() {
        assert_eq!(sync_status(false, false), SyncStatus::LocalOnly);
        assert_eq!(sync_status(false, true), SyncStatus::LocalOnly);
        assert_eq!(sync_status(true, false), SyncStatus::Offline);
        assert_eq!(sync_status(true, true), SyncStatus::Online);

        assert_eq!(SyncStatus::LocalOnly.label(), "Local Only");
        assert_eq!(SyncStatus::Offline.to_string(), "Offline");
        assert!(!SyncStatus::LocalOnly.enabled());
        assert!(SyncStatus::Offline.enabled());
    }

    #[test]
    fn test_network_status_reads_current_value() {
        let network = NetworkStatus::default();
        assert!(network.is_online());
        network.set_online(false);
        assert!(!network.is_online());
        network.set_online(true);
        assert!(network.is_online());
    }
}
