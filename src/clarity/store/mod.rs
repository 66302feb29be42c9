//! 用户状态模块
//!
//! 保存会话身份、访问令牌与内存中的笔记本集合，
//! 其中访问令牌会同步写入本地持久化存储，重启后自动恢复。

pub mod models;
pub mod service;

pub use models::{Notebook, NotebookId, User};
pub use service::UserStore;
