//! HTTP Routes
//!
//! 路由表在应用层维护，这里只注册一个 fallback：
//! 任意方法、任意路径都交给 Dispatcher 处理。

use axum::Router;
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().fallback(handlers::dispatch)
}
