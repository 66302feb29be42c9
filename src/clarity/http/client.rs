//! 带拦截器链的 HTTP 客户端
//!
//! 每个后端一个 [`ApiClient`]：固定 base URL、超时与默认请求头，
//! 每次调用依次经过请求拦截器、实际发送、响应拦截器。单次尝试，不做重试。

use super::error::ClientError;
use super::interceptor::{RequestInterceptor, ResponseInterceptor};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// 本地 AI 后端超时（AI 操作耗时较长）
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(30);
/// 同步服务超时
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(10);

/// 单个后端的客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// 基础地址，例如 `http://localhost:5000`
    pub base_url: String,
    /// 请求超时
    pub timeout: Duration,
    /// 默认请求头
    pub default_headers: HeaderMap,
}

impl ClientConfig {
    /// 创建 JSON 客户端配置（默认带 `Content-Type: application/json`）
    pub fn json(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            base_url: base_url.into(),
            timeout,
            default_headers,
        }
    }
}

/// 待发送的请求，请求拦截器可在发送前修改
///
/// 这里的请求头只作用于本次请求，不会写回客户端默认头。
#[derive(Clone, Debug)]
pub struct PendingRequest {
    pub method: Method,
    /// 相对于 base URL 的路径，例如 `/api/health`
    pub path: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl PendingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Interceptor(format!("序列化请求体失败: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// 已完成的响应（状态码 2xx）
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// 反序列化响应体
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::Decode(format!("{:?}，原始响应: {}", e, self.text()))
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 单个后端的 HTTP 客户端
pub struct ApiClient {
    label: &'static str,
    base_url: String,
    http: reqwest::Client,
    request_interceptors: RwLock<Vec<Arc<dyn RequestInterceptor>>>,
    response_interceptors: RwLock<Vec<Arc<dyn ResponseInterceptor>>>,
}

impl ApiClient {
    /// 根据配置构建客户端，base URL 或请求头非法时返回 [`ClientError::Config`]
    pub fn new(label: &'static str, config: ClientConfig) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("无效的 base URL {:?}: {}", config.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base URL 必须是 http(s) 地址: {}",
                config.base_url
            )));
        }

        let http = reqwest::ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(config.default_headers)
            .build()
            .map_err(|e| ClientError::Config(format!("创建 HTTP 客户端失败: {}", e)))?;

        debug!(
            "[{}] 创建 HTTP 客户端: {} (超时 {:?})",
            label, config.base_url, config.timeout
        );

        Ok(Self {
            label,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            request_interceptors: RwLock::new(Vec::new()),
            response_interceptors: RwLock::new(Vec::new()),
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 追加请求拦截器（按注册顺序执行）
    pub fn add_request_interceptor(&self, interceptor: Arc<dyn RequestInterceptor>) {
        self.request_interceptors
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(interceptor);
    }

    /// 追加响应拦截器（按注册顺序执行）
    pub fn add_response_interceptor(&self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.response_interceptors
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(interceptor);
    }

    /// 拼接完整 URL
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(PendingRequest::new(Method::GET, path)).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError> {
        self.execute(PendingRequest::new(Method::POST, path).with_json(body)?)
            .await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError> {
        self.execute(PendingRequest::new(Method::PUT, path).with_json(body)?)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(PendingRequest::new(Method::DELETE, path)).await
    }

    /// 执行一次请求：请求拦截器 → 发送 → 响应拦截器
    ///
    /// 请求拦截器返回错误时直接中止并返回该错误。
    pub async fn execute(&self, mut request: PendingRequest) -> Result<ApiResponse, ClientError> {
        // 先拷贝出拦截器列表，避免跨 await 持有锁
        let request_chain = self
            .request_interceptors
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for interceptor in &request_chain {
            interceptor.on_request(&mut request).await?;
        }

        let outcome = self.dispatch(&request).await;

        let response_chain = self
            .response_interceptors
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match outcome {
            Ok(response) => {
                for interceptor in &response_chain {
                    interceptor.on_response(&request, &response).await;
                }
                Ok(response)
            }
            Err(mut err) => {
                for interceptor in &response_chain {
                    err = interceptor.on_error(&request, err).await;
                }
                Err(err)
            }
        }
    }

    async fn dispatch(&self, request: &PendingRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(&request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(&url, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(&url, e))?
            .to_vec();

        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse { status, url, body })
    }
}
