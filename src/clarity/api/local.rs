//! 本地 AI 后端 API
//!
//! 本地后端不可达时，所有方法都返回
//! [`ClientError::LocalBackendNotRunning`]（由本地客户端的错误拦截器改写）。

use super::types::{CreateNotebookRequest, LocalHealth, UpdateNotebookRequest};
use crate::clarity::http::{ApiClient, ClientError, ClientRegistry, PendingRequest};
use crate::clarity::store::{Notebook, NotebookId};
use reqwest::Method;
use tracing::{debug, info};

/// 本地 AI 后端 API 客户端
pub struct LocalApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LocalApi<'a> {
    pub fn new(registry: &'a ClientRegistry) -> Self {
        Self {
            client: registry.local(),
        }
    }

    /// 健康检查
    pub async fn health(&self) -> Result<LocalHealth, ClientError> {
        let health: LocalHealth = self.client.get("/api/health").await?.json()?;
        info!(
            "[LocalAI] ✅ 后端状态: {}，LLM: {}，向量集合数: {}",
            health.status, health.llm_model, health.chroma_collections
        );
        Ok(health)
    }

    /// 获取用户的全部笔记本
    pub async fn list_notebooks(&self, user_id: &str) -> Result<Vec<Notebook>, ClientError> {
        let request = PendingRequest::new(Method::GET, "/api/notebooks").with_query("user_id", user_id);
        let notebooks: Vec<Notebook> = self.client.execute(request).await?.json()?;
        debug!("[LocalAI] 获取笔记本列表，共 {} 个", notebooks.len());
        Ok(notebooks)
    }

    /// 获取单个笔记本
    pub async fn get_notebook(&self, user_id: &str, id: &NotebookId) -> Result<Notebook, ClientError> {
        let request = PendingRequest::new(Method::GET, format!("/api/notebooks/{}", id))
            .with_query("user_id", user_id);
        self.client.execute(request).await?.json()
    }

    /// 创建笔记本
    pub async fn create_notebook(&self, request: &CreateNotebookRequest) -> Result<Notebook, ClientError> {
        let notebook: Notebook = self.client.post("/api/notebooks", request).await?.json()?;
        info!("[LocalAI] 📒 已创建笔记本: {}", notebook.id);
        Ok(notebook)
    }

    /// 更新笔记本
    pub async fn update_notebook(
        &self,
        id: &NotebookId,
        request: &UpdateNotebookRequest,
    ) -> Result<Notebook, ClientError> {
        self.client
            .put(&format!("/api/notebooks/{}", id), request)
            .await?
            .json()
    }

    /// 删除笔记本（后端会一并删除其文档与向量集合）
    pub async fn delete_notebook(&self, user_id: &str, id: &NotebookId) -> Result<(), ClientError> {
        let request = PendingRequest::new(Method::DELETE, format!("/api/notebooks/{}", id))
            .with_query("user_id", user_id);
        self.client.execute(request).await?;
        info!("[LocalAI] 🗑️ 已删除笔记本: {}", id);
        Ok(())
    }
}
