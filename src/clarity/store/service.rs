//! 用户状态存储
//!
//! 内存中的会话与笔记本状态。唯一的持久化规则：访问令牌只通过
//! [`UserStore::set_access_token`] 写入，内存值与 `clarity_access_token` 始终一致。

use super::models::{Notebook, NotebookId, User};
use crate::clarity::storage::{keys, LocalStorage, StorageError};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// 用户状态存储
pub struct UserStore {
    storage: Arc<dyn LocalStorage>,
    user: Option<User>,
    access_token: Option<String>,
    notebooks: Vec<Notebook>,
    current_notebook: Option<Notebook>,
}

impl UserStore {
    /// 创建状态存储，若本地已保存访问令牌则恢复到内存
    pub async fn init(storage: Arc<dyn LocalStorage>) -> Result<Self, StorageError> {
        let access_token = storage
            .get_item(keys::ACCESS_TOKEN)
            .await?
            .filter(|t| !t.is_empty());
        if access_token.is_some() {
            info!("[Store] 🔑 从本地存储恢复访问令牌");
        }

        Ok(Self {
            storage,
            user: None,
            access_token,
            notebooks: Vec::new(),
            current_notebook: None,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn notebooks(&self) -> &[Notebook] {
        &self.notebooks
    }

    pub fn current_notebook(&self) -> Option<&Notebook> {
        self.current_notebook.as_ref()
    }

    /// 是否已登录（以用户资料是否存在为准）
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// 整体替换用户资料
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// 设置访问令牌并同步本地存储
    ///
    /// 空字符串按 `None` 处理。先写存储再改内存，存储失败时内存保持原值。
    pub async fn set_access_token(&mut self, token: Option<String>) -> Result<(), StorageError> {
        let token = token.filter(|t| !t.is_empty());
        match &token {
            Some(t) => self.storage.set_item(keys::ACCESS_TOKEN, t).await?,
            None => self.storage.remove_item(keys::ACCESS_TOKEN).await?,
        }
        debug!(
            "[Store] 访问令牌已{}",
            if token.is_some() { "更新" } else { "清除" }
        );
        self.access_token = token;
        Ok(())
    }

    /// 整体替换笔记本集合
    pub fn set_notebooks(&mut self, notebooks: Vec<Notebook>) {
        self.notebooks = notebooks;
    }

    /// 追加笔记本（不检查 ID 是否重复）
    pub fn add_notebook(&mut self, notebook: Notebook) {
        self.notebooks.push(notebook);
    }

    /// 浅合并更新第一个匹配 `id` 的笔记本
    ///
    /// 找不到时不做任何修改，返回 `false`。
    pub fn update_notebook(&mut self, id: &NotebookId, updates: &Map<String, Value>) -> bool {
        match self.notebooks.iter_mut().find(|n| &n.id == id) {
            Some(notebook) => {
                notebook.merge(updates);
                true
            }
            None => {
                debug!("[Store] 更新笔记本时未找到ID: {}", id);
                false
            }
        }
    }

    /// 删除所有匹配 `id` 的笔记本，返回删除数量
    pub fn delete_notebook(&mut self, id: &NotebookId) -> usize {
        let before = self.notebooks.len();
        self.notebooks.retain(|n| &n.id != id);
        before - self.notebooks.len()
    }

    /// 设置当前笔记本（不校验是否属于集合）
    pub fn set_current_notebook(&mut self, notebook: Option<Notebook>) {
        self.current_notebook = notebook;
    }

    /// 退出登录：清空整个本地存储（包括设备 ID）并重置全部状态
    ///
    /// 先清存储再改内存，存储失败时内存状态保持不变。
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.clear().await?;
        self.user = None;
        self.access_token = None;
        self.notebooks.clear();
        self.current_notebook = None;
        info!("[Store] 👋 已退出登录，本地存储已清空");
        Ok(())
    }
}
