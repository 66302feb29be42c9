//! 单元测试共用的辅助工具

use crate::clarity::http::ClientListener;
use async_trait::async_trait;
use std::sync::{Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志（只初始化一次）
pub fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::EnvFilter;

        // 打开当前 crate 的 debug，关闭底层 HTTP 客户端的 debug 噪音
        let filter_layer = EnvFilter::new(
            "info,clarity_client_core=debug,hyper_util::client=info,reqwest=info",
        );

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_test_writer();

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// 启动一个 axum 桩服务，返回其 base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// 一个当前没有任何服务监听的本地地址（连接会被拒绝）
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// 记录所有回调的监听器
#[derive(Default)]
pub struct RecordingListener {
    local_unreachable: Mutex<Vec<String>>,
    sync_failures: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn local_unreachable(&self) -> Vec<String> {
        self.local_unreachable.lock().unwrap().clone()
    }

    pub fn sync_failures(&self) -> Vec<String> {
        self.sync_failures.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientListener for RecordingListener {
    async fn on_local_backend_unreachable(&self, message: String) {
        self.local_unreachable.lock().unwrap().push(message);
    }

    async fn on_sync_failed(&self, message: String) {
        self.sync_failures.lock().unwrap().push(message);
    }
}
