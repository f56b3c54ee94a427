//! Routing - 路由注册与解析
//!
//! 注册阶段: RouteRegistry（可变） → freeze → RouteTable（只读，Arc 共享）

mod catalog;
mod handler;
mod registry;
mod table;

pub use catalog::{
    capitalize_first, BoundMiddleware, HandlerCatalog, MiddlewareCatalog, MiddlewareFactory,
};
pub use handler::{Action, CallableHandler, Controller, ControllerAction, Handler, HandlerFn};
pub use registry::{RouteHandle, RouteRegistry};
pub use table::{Resolution, RouteTable};
