pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod device;
pub mod http;
pub mod router;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// 重新导出启动入口
pub use app::ClarityApp;
pub use config::AppConfig;
