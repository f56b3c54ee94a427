//! 应用层 - 路由注册与分发
//!
//! 包含：
//! - ports: 与外部协作方的端口（ResponseWriter、ViewRenderer、Middleware）
//! - routing: handler、catalog、RouteRegistry / RouteTable
//! - dispatcher: 单次请求的解析、执行与输出
//! - bootstrap: 路由源加载与引擎构建
//! - error: 应用层错误定义

pub mod bootstrap;
pub mod dispatcher;
pub mod error;
pub mod ports;
pub mod routing;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use bootstrap::{Bootstrap, Engine, FnRouteSource, RouteSource};
pub use dispatcher::{write_server_error, DispatchOutcome, Dispatcher};
pub use error::{ConfigurationError, HandlerError};
pub use ports::{
    Middleware, MiddlewareOutcome, ResponseWriter, ViewError, ViewRendererPort, NOT_FOUND_VIEW,
    SERVER_ERROR_VIEW, UNAUTHORIZED_VIEW,
};
pub use routing::{
    BoundMiddleware, Controller, Handler, HandlerCatalog, MiddlewareCatalog, Resolution,
    RouteHandle, RouteRegistry, RouteTable,
};
