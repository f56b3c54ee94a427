//! Middlewares - 内置 middleware 实现
//!
//! 路由文件通过名称引用（`auth` → `Auth`）

mod auth;
mod log;

use std::sync::Arc;

use crate::application::routing::MiddlewareCatalog;

pub use auth::Auth;
pub use log::Log;

/// 内置 middleware 名称表
pub fn default_middlewares(auth_token: Option<&str>) -> MiddlewareCatalog {
    let token: Option<Arc<str>> = auth_token.map(Arc::from);

    let mut catalog = MiddlewareCatalog::new();
    catalog
        .register("Auth", move || Auth::new(token.clone()))
        .register("Log", || Log);
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_middlewares() {
        let catalog = default_middlewares(None);
        assert_eq!(catalog.names(), vec!["Auth", "Log"]);
        assert!(catalog.resolve("auth").is_ok());
        assert!(catalog.resolve("log").is_ok());
        assert!(catalog.resolve("nope").is_err());
    }
}
