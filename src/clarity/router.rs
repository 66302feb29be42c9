//! 路由表
//!
//! 静态的路径 → 页面映射，每个路由带 `requires_auth` 标记。
//! 路径段以 `:` 开头表示参数，例如 `/notebook/:id`。

use crate::clarity::store::UserStore;
use std::collections::HashMap;

/// 路由定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

const fn route(path: &'static str, name: &'static str, requires_auth: bool) -> Route {
    Route {
        path,
        name,
        requires_auth,
    }
}

/// 全部路由
pub const ROUTES: &[Route] = &[
    route("/", "Home", false),
    route("/callback", "LoginCallback", false),
    route("/notebooks", "Notebooks", true),
    route("/notebook/:id", "Notebook", true),
    route("/flashcards", "Flashcards", true),
    route("/flashcard-deck/:id", "FlashcardDeck", true),
    route("/flashcard-deck/:id/study", "FlashcardStudy", true),
    route("/quiz", "Quiz", true),
    route("/mind-maps", "MindMaps", true),
    route("/mind-maps/:id", "MindMap", true),
    route("/analytics", "Analytics", true),
    route("/marketplace", "Marketplace", true),
    route("/settings", "Settings", true),
];

/// 登录回调路由
pub const LOGIN_ROUTE: &str = "/callback";

/// 匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub params: HashMap<String, String>,
}

/// 导航决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    /// 需要登录，跳转到身份提供方
    RedirectToLogin,
}

/// 按路径匹配路由，忽略查询串、片段与末尾的 `/`
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    ROUTES.iter().find_map(|route| {
        let pattern: Vec<&str> = route.path.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (expected, actual) in pattern.iter().zip(&segments) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), actual.to_string());
                }
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(RouteMatch {
            route: *route,
            params,
        })
    })
}

/// 导航守卫：需要登录的路由在未登录时跳转登录
pub fn guard(route: &Route, store: &UserStore) -> Navigation {
    if route.requires_auth && !store.is_authenticated() {
        Navigation::RedirectToLogin
    } else {
        Navigation::Allow
    }
}
