//! Dispatch Handler
//!
//! 所有请求都由这个 fallback handler 转交给 Dispatcher

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::{write_server_error, ResponseWriter};
use crate::infrastructure::http::request::build_request;
use crate::infrastructure::http::response::BufferedResponse;
use crate::infrastructure::http::state::AppState;

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 分发请求
///
/// handler 与 middleware 都是同步代码，放到 blocking 线程池执行；
/// 任务 panic 时输出通用 500 页面。
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let request = build_request(&method, &uri, &headers, &body);
    let span = tracing::info_span!(
        "dispatch",
        request_id = %request_id,
        method = %request.method,
        path = %request.path
    );

    let dispatcher = state.dispatcher.clone();
    let views = state.views.clone();
    let blocking_span = span.clone();
    let task = tokio::task::spawn_blocking(move || {
        let _entered = blocking_span.enter();
        let mut response = BufferedResponse::new(views);
        dispatcher.establish(&request, &mut response);
        response
    });

    let mut response = match task.instrument(span).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Dispatch task failed");
            let mut response = BufferedResponse::new(state.views.clone());
            write_server_error(&mut response);
            response
        }
    };

    response.set_header(REQUEST_ID_HEADER, &request_id);
    response.into_response()
}
