//! 请求/响应拦截器
//!
//! 拦截器是按注册顺序执行的显式列表：
//! - 请求拦截器可以修改待发送的请求，返回错误则中止本次调用；
//! - 响应拦截器观察成功响应，并可改写失败时的错误。

use super::client::{ApiResponse, PendingRequest};
use super::error::ClientError;
use super::listener::ClientListener;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::{error, info, trace, warn};
use uuid::Uuid;

/// 请求关联 ID 头（HTTP 头名大小写不敏感，统一用小写）
pub const OPERATION_ID_HEADER: HeaderName = HeaderName::from_static("operationid");

/// 请求拦截器
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn on_request(&self, request: &mut PendingRequest) -> Result<(), ClientError>;
}

/// 响应拦截器
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// 成功响应，只能观察不能修改
    async fn on_response(&self, _request: &PendingRequest, _response: &ApiResponse) {}

    /// 失败响应，返回值替换原错误向后传递
    async fn on_error(&self, _request: &PendingRequest, error: ClientError) -> ClientError {
        error
    }
}

/// 请求日志：附加 operationID 并在开发模式下打印请求行
pub struct RequestLogger {
    label: &'static str,
    icon: &'static str,
    dev_mode: bool,
}

impl RequestLogger {
    pub fn new(label: &'static str, icon: &'static str, dev_mode: bool) -> Self {
        Self {
            label,
            icon,
            dev_mode,
        }
    }
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn on_request(&self, request: &mut PendingRequest) -> Result<(), ClientError> {
        let operation_id = Uuid::new_v4().to_string();
        let value = HeaderValue::from_str(&operation_id)
            .map_err(|e| ClientError::Interceptor(format!("无效的 operationID: {}", e)))?;
        request.headers.insert(OPERATION_ID_HEADER, value);

        if self.dev_mode {
            info!(
                "{} [{}] {} {}",
                self.icon, self.label, request.method, request.path
            );
        } else {
            trace!(
                "[{}] {} {} operationID={}",
                self.label,
                request.method,
                request.path,
                operation_id
            );
        }
        Ok(())
    }
}

/// 响应日志：开发模式下打印状态码和 URL
pub struct ResponseLogger {
    label: &'static str,
    dev_mode: bool,
}

impl ResponseLogger {
    pub fn new(label: &'static str, dev_mode: bool) -> Self {
        Self { label, dev_mode }
    }
}

#[async_trait]
impl ResponseInterceptor for ResponseLogger {
    async fn on_response(&self, _request: &PendingRequest, response: &ApiResponse) {
        if self.dev_mode {
            info!(
                "✅ [{}] Response: {} {}",
                self.label, response.status, response.url
            );
        }
    }
}

/// 本地后端错误改写：连接失败统一改写为“后端未运行”
pub struct LocalBackendErrorTranslator {
    listener: Arc<dyn ClientListener>,
}

impl LocalBackendErrorTranslator {
    pub fn new(listener: Arc<dyn ClientListener>) -> Self {
        Self { listener }
    }
}

#[async_trait]
impl ResponseInterceptor for LocalBackendErrorTranslator {
    async fn on_error(&self, request: &PendingRequest, err: ClientError) -> ClientError {
        if !err.is_connect() {
            return err;
        }

        error!(
            "❌ [Local AI] Backend not reachable ({} {}): {}",
            request.method, request.path, err
        );
        let translated = ClientError::LocalBackendNotRunning;
        self.listener
            .on_local_backend_unreachable(translated.to_string())
            .await;
        translated
    }
}

/// 同步服务失败上报：记录警告并通知监听器，错误原样返回
///
/// 同步失败不影响本地功能，但必须让调用方看到。
pub struct SyncFailureReporter {
    listener: Arc<dyn ClientListener>,
}

impl SyncFailureReporter {
    pub fn new(listener: Arc<dyn ClientListener>) -> Self {
        Self { listener }
    }
}

#[async_trait]
impl ResponseInterceptor for SyncFailureReporter {
    async fn on_error(&self, request: &PendingRequest, err: ClientError) -> ClientError {
        warn!(
            "⚠️ [Cloud Sync] Failed (local still works): {} {}: {}",
            request.method, request.path, err
        );
        self.listener.on_sync_failed(err.to_string()).await;
        err
    }
}
