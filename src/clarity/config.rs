//! 应用配置
//!
//! 所有环境变量在启动时一次性解析为不可变的 [`AppConfig`]，
//! 之后显式传入各个构造函数，不在模块内部零散读取环境。

use std::env;

/// 本地 AI 后端默认地址
pub const DEFAULT_LOCAL_BACKEND_URL: &str = "http://localhost:5000";
/// 前端应用默认 origin（用于推导登录回调地址）
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:5173";
/// 默认本地存储数据库
pub const DEFAULT_STORAGE_URL: &str = "sqlite://clarity.db?mode=rwc";

/// 身份提供方（Auth0）配置
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// 租户域名
    pub domain: Option<String>,
    /// 客户端 ID
    pub client_id: Option<String>,
    /// 登录回调地址
    pub redirect_uri: String,
    /// API audience，未配置时不下发
    pub audience: Option<String>,
}

/// 应用配置
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// 本地 AI 后端地址
    pub local_backend_url: String,
    /// 云同步服务地址，`None` 表示仅本地模式
    pub sync_service_url: Option<String>,
    /// 身份提供方配置
    pub identity: IdentityConfig,
    /// 开发模式：打开请求/响应日志
    pub dev_mode: bool,
    /// 本地存储 SQLite URL
    pub storage_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            local_backend_url: DEFAULT_LOCAL_BACKEND_URL.to_string(),
            sync_service_url: None,
            identity: IdentityConfig {
                redirect_uri: format!("{}/callback", DEFAULT_APP_ORIGIN),
                ..Default::default()
            },
            dev_mode: false,
            storage_url: DEFAULT_STORAGE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// 从进程环境变量读取配置
    ///
    /// - `CLARITY_LOCAL_BACKEND_URL`：本地后端地址（默认 http://localhost:5000）
    /// - `CLARITY_SYNC_SERVICE_URL`：同步服务地址（存在即开启同步）
    /// - `CLARITY_AUTH0_DOMAIN` / `CLARITY_AUTH0_CLIENT_ID` / `CLARITY_AUTH0_CALLBACK_URL` / `CLARITY_AUTH0_AUDIENCE`
    /// - `CLARITY_APP_ORIGIN`：前端 origin（默认 http://localhost:5173）
    /// - `CLARITY_DEV`：`1` 或 `true` 打开开发模式
    /// - `CLARITY_STORAGE_URL`：本地存储数据库
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过自定义查找函数读取配置，空字符串视为未配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let origin = get("CLARITY_APP_ORIGIN").unwrap_or_else(|| DEFAULT_APP_ORIGIN.to_string());
        let redirect_uri = get("CLARITY_AUTH0_CALLBACK_URL")
            .unwrap_or_else(|| format!("{}/callback", origin.trim_end_matches('/')));

        Self {
            local_backend_url: get("CLARITY_LOCAL_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_LOCAL_BACKEND_URL.to_string()),
            sync_service_url: get("CLARITY_SYNC_SERVICE_URL"),
            identity: IdentityConfig {
                domain: get("CLARITY_AUTH0_DOMAIN"),
                client_id: get("CLARITY_AUTH0_CLIENT_ID"),
                redirect_uri,
                audience: get("CLARITY_AUTH0_AUDIENCE"),
            },
            dev_mode: get("CLARITY_DEV")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            storage_url: get("CLARITY_STORAGE_URL")
                .unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string()),
        }
    }

    /// 是否配置了同步服务
    pub fn is_sync_configured(&self) -> bool {
        self.sync_service_url.is_some()
    }
}
