//! 应用启动装配
//!
//! 按顺序初始化：本地存储 → 用户状态 → HTTP 客户端 → 路由与身份配置。

use crate::clarity::config::{AppConfig, IdentityConfig};
use crate::clarity::device::{get_device_id, Connectivity, NetworkStatus, SyncStatus};
use crate::clarity::http::{ClientListener, ClientRegistry, EmptyClientListener, TokenProvider};
use crate::clarity::router::{self, Navigation, RouteMatch};
use crate::clarity::storage::{LocalStorage, SqliteStorage};
use crate::clarity::store::UserStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// 运行中的应用
pub struct ClarityApp {
    config: AppConfig,
    storage: Arc<dyn LocalStorage>,
    store: UserStore,
    clients: ClientRegistry,
    network: Arc<NetworkStatus>,
}

impl ClarityApp {
    /// 使用 SQLite 本地存储启动（使用默认空监听器）
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        let storage = SqliteStorage::connect(&config.storage_url)
            .await
            .context("打开本地存储失败")?;
        Self::with_parts(config, Arc::new(storage), Arc::new(EmptyClientListener)).await
    }

    /// 使用给定的存储与监听器启动
    pub async fn with_parts(
        config: AppConfig,
        storage: Arc<dyn LocalStorage>,
        listener: Arc<dyn ClientListener>,
    ) -> Result<Self> {
        info!("[App] 🚀 启动 Clarity 客户端");
        debug!(
            "[App] 身份配置: domain={:?}, client_id={:?}, redirect_uri={}, audience={:?}",
            config.identity.domain,
            config.identity.client_id,
            config.identity.redirect_uri,
            config.identity.audience
        );

        let store = UserStore::init(storage.clone())
            .await
            .context("初始化用户状态失败")?;
        let clients =
            ClientRegistry::with_listener(&config, listener).context("创建 HTTP 客户端失败")?;

        info!(
            "[App] ✅ 启动完成，同步: {}",
            if clients.is_sync_enabled() { "已启用" } else { "仅本地" }
        );

        Ok(Self {
            config,
            storage,
            store,
            clients,
            network: Arc::new(NetworkStatus::default()),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn identity(&self) -> &IdentityConfig {
        &self.config.identity
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UserStore {
        &mut self.store
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    pub fn storage(&self) -> &dyn LocalStorage {
        self.storage.as_ref()
    }

    /// 网络状态，宿主在 online/offline 变化时更新
    pub fn network(&self) -> Arc<NetworkStatus> {
        self.network.clone()
    }

    /// 登录完成后调用：配置同步鉴权
    pub fn configure_sync_auth(&self, provider: Arc<dyn TokenProvider>) -> bool {
        self.clients.configure_sync_auth(provider)
    }

    pub async fn device_id(&self) -> Result<String> {
        get_device_id(self.storage.as_ref())
            .await
            .context("读取设备ID失败")
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.clients.sync_status(self.network.as_ref() as &dyn Connectivity)
    }

    /// 解析路径并执行导航守卫
    pub fn navigate(&self, path: &str) -> Option<(RouteMatch, Navigation)> {
        let matched = router::resolve(path)?;
        let decision = router::guard(&matched.route, &self.store);
        debug!("[App] 导航 {} -> {} ({:?})", path, matched.route.name, decision);
        Some((matched, decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clarity::storage::MemoryStorage;
    use crate::clarity::store::User;

    #[tokio::test]
    async fn test_bootstrap_local_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            storage_url: format!("sqlite://{}?mode=rwc", dir.path().join("app.db").display()),
            ..Default::default()
        };
        let app = ClarityApp::bootstrap(config).await.unwrap();

        assert_eq!(app.sync_status(), SyncStatus::LocalOnly);
        assert_eq!(app.clients().local().base_url(), "http://localhost:5000");
        assert!(app.identity().redirect_uri.ends_with("/callback"));

        let id = app.device_id().await.unwrap();
        assert_eq!(app.device_id().await.unwrap(), id);
    }

    #[tokio::test]
    async fn test_bootstrap_restores_token_and_tracks_network() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(crate::clarity::storage::keys::ACCESS_TOKEN, "saved")
            .await
            .unwrap();
        let config = AppConfig {
            sync_service_url: Some("https://sync.example.com".into()),
            ..Default::default()
        };
        let mut app = ClarityApp::with_parts(config, storage, Arc::new(EmptyClientListener))
            .await
            .unwrap();

        assert_eq!(app.store().access_token(), Some("saved"));
        assert_eq!(app.sync_status(), SyncStatus::Online);
        app.network().set_online(false);
        assert_eq!(app.sync_status(), SyncStatus::Offline);

        let (_, decision) = app.navigate("/quiz").unwrap();
        assert_eq!(decision, Navigation::RedirectToLogin);
        app.store_mut().set_user(Some(User::default()));
        let (_, decision) = app.navigate("/quiz").unwrap();
        assert_eq!(decision, Navigation::Allow);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_malformed_backend_url() {
        let config = AppConfig {
            local_backend_url: "localhost:5000 nope".into(),
            ..Default::default()
        };
        let result = ClarityApp::with_parts(
            config,
            Arc::new(MemoryStorage::new()),
            Arc::new(EmptyClientListener),
        )
        .await;
        assert!(result.is_err());
    }
}
