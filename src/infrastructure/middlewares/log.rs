//! Log Middleware

use crate::application::ports::{Middleware, MiddlewareOutcome, ResponseWriter};
use crate::domain::routing::Request;

/// 记录请求后继续执行
#[derive(Debug, Default)]
pub struct Log;

impl Middleware for Log {
    fn handle(&self, request: &Request, _response: &mut dyn ResponseWriter) -> MiddlewareOutcome {
        tracing::info!(
            method = %request.method,
            path = %request.path,
            user_agent = request.header("user-agent").unwrap_or("-"),
            "Request received"
        );
        MiddlewareOutcome::Continue
    }
}
