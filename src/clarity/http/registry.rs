//! 客户端注册表
//!
//! 启动时根据 [`AppConfig`] 一次性构建两个客户端：
//! - 本地 AI 后端客户端：总是存在，30 秒超时；
//! - 同步服务客户端：仅在配置了地址时存在，10 秒超时。
//!
//! 注册表以引用传给需要发请求的组件，不使用全局单例。

use super::auth::{BearerAuthInterceptor, TokenProvider};
use super::client::{ApiClient, ClientConfig, LOCAL_TIMEOUT, SYNC_TIMEOUT};
use super::error::ClientError;
use super::interceptor::{
    LocalBackendErrorTranslator, RequestLogger, ResponseLogger, SyncFailureReporter,
};
use super::listener::{ClientListener, EmptyClientListener};
use crate::clarity::config::AppConfig;
use crate::clarity::device::{sync_status, Connectivity, SyncStatus};
use std::sync::Arc;
use tracing::{debug, info};

pub const LOCAL_LABEL: &str = "Local AI";
pub const SYNC_LABEL: &str = "Cloud Sync";

/// 客户端注册表
pub struct ClientRegistry {
    local: ApiClient,
    sync: Option<ApiClient>,
}

impl ClientRegistry {
    /// 创建注册表（使用默认空监听器）
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_listener(config, Arc::new(EmptyClientListener))
    }

    /// 创建注册表（带自定义监听器）
    pub fn with_listener(
        config: &AppConfig,
        listener: Arc<dyn ClientListener>,
    ) -> Result<Self, ClientError> {
        let local = ApiClient::new(
            LOCAL_LABEL,
            ClientConfig::json(config.local_backend_url.clone(), LOCAL_TIMEOUT),
        )?;
        local.add_request_interceptor(Arc::new(RequestLogger::new(
            LOCAL_LABEL,
            "🤖",
            config.dev_mode,
        )));
        local.add_response_interceptor(Arc::new(ResponseLogger::new(LOCAL_LABEL, config.dev_mode)));
        local.add_response_interceptor(Arc::new(LocalBackendErrorTranslator::new(
            listener.clone(),
        )));

        let sync = match &config.sync_service_url {
            Some(url) => {
                let sync = ApiClient::new(SYNC_LABEL, ClientConfig::json(url.clone(), SYNC_TIMEOUT))?;
                sync.add_request_interceptor(Arc::new(RequestLogger::new(
                    SYNC_LABEL,
                    "☁️",
                    config.dev_mode,
                )));
                sync.add_response_interceptor(Arc::new(ResponseLogger::new(
                    SYNC_LABEL,
                    config.dev_mode,
                )));
                sync.add_response_interceptor(Arc::new(SyncFailureReporter::new(listener)));
                Some(sync)
            }
            None => None,
        };

        info!(
            "[Client] 🔗 客户端已创建: local={}, sync={}",
            local.base_url(),
            sync.as_ref().map(|c| c.base_url()).unwrap_or("未配置")
        );

        Ok(Self { local, sync })
    }

    /// 本地 AI 后端客户端
    pub fn local(&self) -> &ApiClient {
        &self.local
    }

    /// 同步服务客户端，未配置时为 `None`
    pub fn sync(&self) -> Option<&ApiClient> {
        self.sync.as_ref()
    }

    pub fn is_sync_enabled(&self) -> bool {
        self.sync.is_some()
    }

    /// 为同步客户端配置 token 获取函数（登录后调用）
    ///
    /// 之后每个同步请求都会先调用 `provider`。未配置同步服务时不做任何事，返回 `false`。
    ///
    /// 每次调用都会追加一个鉴权拦截器，不会替换之前配置的；多次调用时
    /// 每个请求会依次调用所有 `provider`，最后一个拿到 token 的生效。
    pub fn configure_sync_auth(&self, provider: Arc<dyn TokenProvider>) -> bool {
        match &self.sync {
            Some(sync) => {
                sync.add_request_interceptor(Arc::new(BearerAuthInterceptor::new(provider)));
                info!("[CloudSync] 🔐 已配置同步鉴权");
                true
            }
            None => {
                debug!("[CloudSync] 未配置同步服务，忽略鉴权配置");
                false
            }
        }
    }

    /// 当前同步状态
    pub fn sync_status(&self, connectivity: &dyn Connectivity) -> SyncStatus {
        sync_status(self.is_sync_enabled(), connectivity.is_online())
    }
}
