//! Auth Middleware
//!
//! 要求请求带有 Authorization 头；配置了 token 时必须为 `Bearer <token>`。
//! 校验失败时输出 401 视图并中止分发。

use std::sync::Arc;

use crate::application::ports::{Middleware, MiddlewareOutcome, ResponseWriter, UNAUTHORIZED_VIEW};
use crate::domain::routing::{Request, CONTENT_TYPE_HTML};

const UNAUTHORIZED_FALLBACK: &str = "<h1>401 Unauthorized</h1>";

pub struct Auth {
    token: Option<Arc<str>>,
}

impl Auth {
    pub fn new(token: Option<Arc<str>>) -> Self {
        Self { token }
    }

    fn authorized(&self, request: &Request) -> bool {
        let Some(header) = request.header("authorization") else {
            return false;
        };

        match &self.token {
            Some(token) => header
                .strip_prefix("Bearer ")
                .map(|presented| presented == token.as_ref())
                .unwrap_or(false),
            None => !header.trim().is_empty(),
        }
    }
}

impl Middleware for Auth {
    fn handle(&self, request: &Request, response: &mut dyn ResponseWriter) -> MiddlewareOutcome {
        if self.authorized(request) {
            return MiddlewareOutcome::Continue;
        }

        tracing::warn!(method = %request.method, path = %request.path, "Unauthorized request");

        response.set_status_code(401);
        response.set_content_type(CONTENT_TYPE_HTML);
        response.set_header("www-authenticate", "Bearer");
        let body = response
            .view(UNAUTHORIZED_VIEW)
            .unwrap_or_else(|_| UNAUTHORIZED_FALLBACK.to_string());
        response.write(&body);

        MiddlewareOutcome::Halt
    }
}
