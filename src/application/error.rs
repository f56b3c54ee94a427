//! 应用层错误定义
//!
//! - ConfigurationError: 启动期错误（路由定义损坏），致命，不会开始对外服务
//! - HandlerError: 单次请求内的错误，由 Dispatcher 转为 500 响应

use thiserror::Error;

use crate::application::ports::ViewError;
use crate::domain::routing::RoutingError;

/// 路由定义加载错误
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// middleware 名称无法解析
    #[error("Unknown middleware `{name}`: `{resolved}` is not registered")]
    UnknownMiddleware { name: String, resolved: String },

    #[error("Unknown callable: {0}")]
    UnknownCallable(String),

    #[error("Unknown controller: {0}")]
    UnknownController(String),

    #[error("Unknown action `{action}` on controller `{controller}`")]
    UnknownAction { controller: String, action: String },

    /// 路由定义本身不合法（字段缺失、冲突等）
    #[error("Invalid route in {origin}: {message}")]
    InvalidRoute { origin: String, message: String },

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl ConfigurationError {
    pub fn invalid_route(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRoute {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// handler / middleware 执行错误
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Result(#[from] RoutingError),
}

impl HandlerError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(err.to_string())
    }
}
