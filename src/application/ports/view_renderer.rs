//! View Renderer Port - 视图渲染
//!
//! 视图语法不属于路由核心，这里只约定“名称 → 字符串”

use thiserror::Error;

/// 路由未命中时渲染的视图
pub const NOT_FOUND_VIEW: &str = "default/404_error";

/// handler 失败时渲染的视图
pub const SERVER_ERROR_VIEW: &str = "default/500_error";

/// 鉴权失败时渲染的视图
pub const UNAUTHORIZED_VIEW: &str = "default/401_error";

/// 视图渲染错误
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("View not found: {0}")]
    NotFound(String),

    #[error("Invalid view name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// View Renderer Port
pub trait ViewRendererPort: Send + Sync {
    /// 渲染命名视图
    fn render(&self, name: &str) -> Result<String, ViewError>;
}
