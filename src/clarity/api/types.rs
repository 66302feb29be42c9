//! 后端接口请求/响应结构

use crate::clarity::store::Notebook;
use serde::{Deserialize, Serialize};

/// 本地后端健康检查响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalHealth {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub embedder_model: String,
    #[serde(default)]
    pub llm_model: String,
    #[serde(default)]
    pub chroma_collections: i64,
}

/// 创建笔记本请求
#[derive(Debug, Clone, Serialize)]
pub struct CreateNotebookRequest {
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 更新笔记本请求，未设置的字段保持不变
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNotebookRequest {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 同步服务健康检查响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncHealth {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// 用户同步概况
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncOverview {
    pub user_id: String,
    #[serde(default)]
    pub last_sync: Option<String>,
    #[serde(default)]
    pub notebooks_synced: i64,
    #[serde(default)]
    pub conversations_synced: i64,
    #[serde(default)]
    pub status: String,
}

/// 推送到同步服务的笔记本（仅文本，不含向量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncNotebookRequest {
    pub id: String,
    pub title: String,
    pub content: String,
    pub device_id: String,
}

impl SyncNotebookRequest {
    /// 由本地笔记本构建，正文取 `content`，没有时退回 `description`
    pub fn from_notebook(notebook: &Notebook, device_id: &str) -> Self {
        let content = ["content", "description"]
            .iter()
            .find_map(|key| notebook.get(key).and_then(|v| v.as_str()))
            .unwrap_or_default();
        Self {
            id: notebook.id.to_string(),
            title: notebook.title().unwrap_or_default().to_string(),
            content: content.to_string(),
            device_id: device_id.to_string(),
        }
    }
}

/// 推送结果
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncNotebookAck {
    pub status: String,
    pub notebook_id: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 同步服务上保存的笔记本
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncedNotebook {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SyncedNotebookList {
    #[serde(default)]
    pub notebooks: Vec<SyncedNotebook>,
}
