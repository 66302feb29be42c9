//! HTTP 客户端模块
//!
//! 本地 AI 后端与可选的云同步服务各有一个客户端，
//! 通过显式的拦截器链实现日志、错误改写与鉴权注入。

pub mod auth;
pub mod client;
pub mod error;
pub mod interceptor;
pub mod listener;
pub mod registry;

// 重新导出主要类型
pub use auth::{BearerAuthInterceptor, TokenProvider};
pub use client::{ApiClient, ApiResponse, ClientConfig, PendingRequest};
pub use error::ClientError;
pub use interceptor::{RequestInterceptor, ResponseInterceptor};
pub use listener::{ClientListener, EmptyClientListener};
pub use registry::ClientRegistry;
