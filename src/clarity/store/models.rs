//! 用户状态模型定义

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// 笔记本 ID（后端可能返回字符串或整数）
///
/// 字符串 `"1"` 与整数 `1` 视为不同的 ID。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotebookId {
    Int(i64),
    Text(String),
}

impl From<i64> for NotebookId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for NotebookId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for NotebookId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// 笔记本记录：除 `id` 外的字段原样保存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Notebook {
    pub fn new(id: impl Into<NotebookId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// 标题（本地后端与同步服务都使用 `title` 字段）
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// 浅合并：`updates` 中的字段覆盖已有字段，`id` 键会替换 ID
    pub fn merge(&mut self, updates: &Map<String, Value>) {
        for (key, value) in updates {
            if key == "id" {
                match serde_json::from_value::<NotebookId>(value.clone()) {
                    Ok(id) => self.id = id,
                    Err(_) => warn!("[Store] 忽略非法的笔记本ID更新: {}", value),
                }
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// 登录用户资料（身份提供方返回的 profile）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 身份提供方的用户 ID，例如 `auth0|123456`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notebook_id_accepts_string_and_number() {
        let a: Notebook = serde_json::from_value(json!({"id": 7, "title": "Bio"})).unwrap();
        let b: Notebook = serde_json::from_value(json!({"id": "7", "title": "Bio"})).unwrap();
        assert_eq!(a.id, NotebookId::Int(7));
        assert_eq!(b.id, NotebookId::Text("7".into()));
        assert_ne!(a.id, b.id);
        assert_eq!(a.title(), Some("Bio"));
        assert_eq!(serde_json::to_value(&a).unwrap(), json!({"id": 7, "title": "Bio"}));
    }

    #[test]
    fn test_merge_is_shallow_and_later_wins() {
        let mut nb = Notebook::new("n1")
            .with_field("title", "Old")
            .with_field("meta", json!({"a": 1, "b": 2}));
        let updates = json!({"title": "New", "meta": {"a": 3}, "id": 9});
        nb.merge(updates.as_object().unwrap());

        assert_eq!(nb.id, NotebookId::Int(9));
        assert_eq!(nb.title(), Some("New"));
        assert_eq!(nb.get("meta"), Some(&json!({"a": 3})));
    }
}
