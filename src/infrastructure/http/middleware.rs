//! HTTP Middleware
//!
//! 按响应状态码记录日志：4xx → warn，5xx → error

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use super::handlers::REQUEST_ID_HEADER;

pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            request_id = %request_id,
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            request_id = %request_id,
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}
