//! 客户端事件监听器回调接口

use async_trait::async_trait;

/// 客户端事件监听器（由 UI 层注册，用于刷新状态指示）
#[async_trait]
pub trait ClientListener: Send + Sync {
    /// 本地 AI 后端不可达，参数为面向用户的提示
    async fn on_local_backend_unreachable(&self, message: String);

    /// 同步请求失败（非致命，本地功能不受影响）
    async fn on_sync_failed(&self, message: String);
}

/// 默认空实现（无操作）
pub struct EmptyClientListener;

#[async_trait]
impl ClientListener for EmptyClientListener {
    async fn on_local_backend_unreachable(&self, _message: String) {}
    async fn on_sync_failed(&self, _message: String) {}
}
