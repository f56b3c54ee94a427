//! Middleware Port - 路由守卫
//!
//! 每次分发都会通过工厂新建一个实例，在 handler 之前执行一次。

use super::ResponseWriter;
use crate::domain::routing::Request;

/// middleware 执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddlewareOutcome {
    /// 继续执行 handler
    Continue,
    /// middleware 已写好响应，停止分发
    Halt,
}

/// Middleware Port
pub trait Middleware {
    fn handle(&self, request: &Request, response: &mut dyn ResponseWriter) -> MiddlewareOutcome;
}
