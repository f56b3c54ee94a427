//! Application Ports - 出站端口定义
//!
//! 定义路由核心与外部协作方（响应输出、视图渲染、middleware）之间的抽象接口

mod middleware;
mod response_writer;
mod view_renderer;

pub use middleware::{Middleware, MiddlewareOutcome};
pub use response_writer::ResponseWriter;
pub use view_renderer::{
    ViewError, ViewRendererPort, NOT_FOUND_VIEW, SERVER_ERROR_VIEW, UNAUTHORIZED_VIEW,
};
