//! Routing Context - 路由限界上下文
//!
//! 职责:
//! - 方法桶与请求方法规范化
//! - 路由键（精确路径匹配）
//! - 规范化请求描述
//! - handler 结果类型

mod errors;
mod reply;
mod value_objects;

pub use errors::RoutingError;
pub use reply::{Reply, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON};
pub use value_objects::{MethodBucket, Request, RequestMethod, RouteKey};
