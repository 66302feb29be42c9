//! 同步服务鉴权：为每个请求注入 bearer token

use super::client::PendingRequest;
use super::error::ClientError;
use super::interceptor::RequestInterceptor;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// 访问令牌获取函数（通常由身份提供方 SDK 提供，可能需要网络）
///
/// 任意 `Fn() -> Future<Output = anyhow::Result<Option<String>>>` 闭包都实现了该接口。
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_access_token(&self) -> anyhow::Result<Option<String>>;
}

#[async_trait]
impl<F, Fut> TokenProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Option<String>>> + Send + 'static,
{
    async fn get_access_token(&self) -> anyhow::Result<Option<String>> {
        (self)().await
    }
}

/// Bearer 鉴权拦截器
///
/// 每次请求都重新获取 token，只写入本次请求的请求头。
/// 获取失败或为空时照常发送请求，不带鉴权头。
pub struct BearerAuthInterceptor {
    provider: Arc<dyn TokenProvider>,
}

impl BearerAuthInterceptor {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl RequestInterceptor for BearerAuthInterceptor {
    async fn on_request(&self, request: &mut PendingRequest) -> Result<(), ClientError> {
        let token = match self.provider.get_access_token().await {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => {
                debug!("[CloudSync] 未获取到 token，本次请求不带鉴权头");
                return Ok(());
            }
            Err(e) => {
                warn!("⚠️ [Cloud Sync] Could not get auth token: {:#}", e);
                return Ok(());
            }
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => warn!("⚠️ [Cloud Sync] token 含非法字符，已忽略: {}", e),
        }
        Ok(())
    }
}
