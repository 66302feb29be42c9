//! HTTP 客户端错误分类

use reqwest::StatusCode;

/// 启动本地后端的命令，拼在不可达提示里
pub const LOCAL_BACKEND_START_HINT: &str = "uvicorn app.main:app --reload --port 5000";

/// HTTP 客户端错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 客户端配置错误（构造阶段）
    #[error("客户端配置错误: {0}")]
    Config(String),

    /// 本地 AI 后端不可达（由本地客户端的错误拦截器改写）
    #[error(
        "Local AI backend not running. Please start it with: uvicorn app.main:app --reload --port 5000"
    )]
    LocalBackendNotRunning,

    /// 建立连接失败（连接被拒绝、网络不可达等）
    #[error("无法连接到 {url}: {message}")]
    Connect { url: String, message: String },

    /// 超过客户端固定超时
    #[error("请求超时: {url}")]
    Timeout { url: String },

    /// 服务端返回非 2xx 状态
    #[error("HTTP 错误 {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// 其他传输层错误
    #[error("请求失败: {0}")]
    Transport(String),

    /// 响应体反序列化失败
    #[error("反序列化响应失败: {0}")]
    Decode(String),

    /// 请求拦截器拒绝了请求
    #[error("拦截器错误: {0}")]
    Interceptor(String),
}

impl ClientError {
    /// 将 reqwest 错误按类别归类
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: format!("{:#}", anyhow::Error::new(err)),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// 是否为连接层失败（后端未启动或网络不可达）
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }

    /// HTTP 状态码（仅 `Status` 变体有）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
