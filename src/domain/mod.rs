//! Domain Layer - 领域层
//!
//! Routing Context: 方法桶、路由键、请求描述与 handler 结果

pub mod routing;

pub use routing::{MethodBucket, Reply, Request, RequestMethod, RouteKey, RoutingError};
