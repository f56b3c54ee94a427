//! Buffered Response
//!
//! ResponseWriter 的 HTTP 实现：分发过程中先写入内存，结束后转为 axum Response

use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::ports::{ResponseWriter, ViewError, ViewRendererPort};
use crate::domain::routing::CONTENT_TYPE_HTML;

pub struct BufferedResponse {
    status: u16,
    content_type: String,
    headers: Vec<(String, String)>,
    body: String,
    views: Arc<dyn ViewRendererPort>,
}

impl BufferedResponse {
    pub fn new(views: Arc<dyn ViewRendererPort>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML.to_string(),
            headers: Vec::new(),
            body: String::new(),
            views,
        }
    }
}

impl ResponseWriter for BufferedResponse {
    fn set_status_code(&mut self, code: u16) {
        self.status = code;
    }

    fn status_code(&self) -> u16 {
        self.status
    }

    fn set_content_type(&mut self, mime: &str) {
        self.content_type = mime.to_string();
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn view(&self, name: &str) -> Result<String, ViewError> {
        self.views.render(name)
    }

    fn write(&mut self, chunk: &str) {
        self.body.push_str(chunk);
    }

    fn clear_body(&mut self) {
        self.body.clear();
    }

    fn clear_headers(&mut self) {
        self.headers.clear();
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or_else(|_| {
            tracing::warn!(status = self.status, "Invalid status code, using 500");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&self.content_type) {
            Ok(value) => {
                headers.insert(CONTENT_TYPE, value);
            }
            Err(_) => tracing::warn!(content_type = %self.content_type, "Invalid content type dropped"),
        }

        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => tracing::warn!(header = %name, "Invalid response header dropped"),
            }
        }

        (status, headers, self.body).into_response()
    }
}
