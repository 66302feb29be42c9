//! 云同步服务 API
//!
//! 同步服务是可选的：未配置时 [`SyncApi::new`] 返回 `None`，调用方按“仅本地”处理。
//! 请求失败会被同步客户端的拦截器记录为警告，然后原样返回。

use super::types::{
    SyncHealth, SyncNotebookAck, SyncNotebookRequest, SyncOverview, SyncedNotebook,
    SyncedNotebookList,
};
use crate::clarity::http::{ApiClient, ClientError, ClientRegistry};
use tracing::{debug, info};

/// 同步服务 API 客户端
pub struct SyncApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SyncApi<'a> {
    /// 未配置同步服务时返回 `None`
    pub fn new(registry: &'a ClientRegistry) -> Option<Self> {
        registry.sync().map(|client| Self { client })
    }

    /// 健康检查（无需鉴权）
    pub async fn health(&self) -> Result<SyncHealth, ClientError> {
        self.client.get("/api/health").await?.json()
    }

    /// 当前用户的同步概况
    pub async fn status(&self) -> Result<SyncOverview, ClientError> {
        let overview: SyncOverview = self.client.get("/api/sync/status").await?.json()?;
        debug!(
            "[CloudSync] 同步概况: 笔记本 {} 个，对话 {} 条",
            overview.notebooks_synced, overview.conversations_synced
        );
        Ok(overview)
    }

    /// 推送单个笔记本（服务端按 ID 新建或覆盖）
    pub async fn push_notebook(
        &self,
        notebook: &SyncNotebookRequest,
    ) -> Result<SyncNotebookAck, ClientError> {
        let ack: SyncNotebookAck = self
            .client
            .post("/api/sync/notebooks", notebook)
            .await?
            .json()?;
        info!("[CloudSync] ☁️ 笔记本已同步: {}", ack.notebook_id);
        Ok(ack)
    }

    /// 拉取全部已同步的笔记本（按更新时间倒序）
    pub async fn pull_notebooks(&self) -> Result<Vec<SyncedNotebook>, ClientError> {
        let list: SyncedNotebookList = self.client.get("/api/sync/notebooks").await?.json()?;
        debug!("[CloudSync] 拉取到 {} 个笔记本", list.notebooks.len());
        Ok(list.notebooks)
    }

    /// 拉取单个笔记本
    pub async fn get_notebook(&self, id: &str) -> Result<SyncedNotebook, ClientError> {
        self.client
            .get(&format!("/api/sync/notebooks/{}", id))
            .await?
            .json()
    }

    /// 删除云端笔记本
    pub async fn delete_notebook(&self, id: &str) -> Result<(), ClientError> {
        self.client
            .delete(&format!("/api/sync/notebooks/{}", id))
            .await?;
        info!("[CloudSync] 🗑️ 已删除云端笔记本: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clarity::config::AppConfig;
    use crate::clarity::test_support::{spawn_stub, RecordingListener};
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn registry(sync: Option<String>, listener: Arc<RecordingListener>) -> ClientRegistry {
        ClientRegistry::with_listener(
            &AppConfig {
                sync_service_url: sync,
                ..Default::default()
            },
            listener,
        )
        .unwrap()
    }

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/api/sync/notebooks",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    if headers.get("authorization").is_none() {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    Ok(Json(json!({
                        "status": "synced",
                        "notebook_id": body["id"],
                        "updated_at": "2024-01-01T00:00:00"
                    })))
                })
                .get(|| async {
                    Json(json!({"notebooks": [
                        {"id": "a", "title": "A", "content": "x", "device_id": "d1",
                         "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-02T00:00:00"}
                    ]}))
                }),
            )
            .route(
                "/api/sync/notebooks/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "missing" {
                        Err(StatusCode::NOT_FOUND)
                    } else {
                        Ok(Json(json!({"id": id, "title": "T", "content": "C"})))
                    }
                })
                .delete(|Path(id): Path<String>| async move {
                    Json(json!({"status": "deleted", "notebook_id": id}))
                }),
            )
    }

    #[test]
    fn test_absent_when_not_configured() {
        let registry = registry(None, Arc::new(RecordingListener::default()));
        assert!(SyncApi::new(&registry).is_none());
    }

    #[tokio::test]
    async fn test_push_requires_auth_and_failure_is_visible() {
        let base = spawn_stub(stub_router()).await;
        let listener = Arc::new(RecordingListener::default());
        let registry = registry(Some(base), listener.clone());
        let api = SyncApi::new(&registry).unwrap();
        let request = SyncNotebookRequest {
            id: "a".into(),
            title: "A".into(),
            content: "x".into(),
            device_id: "d1".into(),
        };

        let err = api.push_notebook(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(listener.sync_failures().len(), 1);

        registry.configure_sync_auth(Arc::new(|| async {
            Ok::<Option<String>, anyhow::Error>(Some("jwt".to_string()))
        }));
        let ack = api.push_notebook(&request).await.unwrap();
        assert_eq!(ack.status, "synced");
        assert_eq!(ack.notebook_id, "a");
        assert_eq!(listener.sync_failures().len(), 1);
    }

    #[tokio::test]
    async fn test_pull_get_delete() {
        let base = spawn_stub(stub_router()).await;
        let listener = Arc::new(RecordingListener::default());
        let registry = registry(Some(base), listener.clone());
        let api = SyncApi::new(&registry).unwrap();

        let notebooks = api.pull_notebooks().await.unwrap();
        assert_eq!(notebooks.len(), 1);
        assert_eq!(notebooks[0].device_id.as_deref(), Some("d1"));

        assert_eq!(api.get_notebook("b").await.unwrap().content, "C");
        let err = api.get_notebook("missing").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(listener.sync_failures().len(), 1);

        api.delete_notebook("b").await.unwrap();
    }
}
