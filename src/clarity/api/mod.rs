//! 后端 API 客户端
//!
//! 在两个 HTTP 客户端之上封装前端实际调用的接口，
//! 错误类型保持为 [`ClientError`](crate::clarity::http::ClientError)，调用方可以按类别处理。

pub mod local;
pub mod sync;
pub mod types;

pub use local::LocalApi;
pub use sync::SyncApi;
