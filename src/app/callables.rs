//! 独立函数 handler

use serde::Serialize;

use crate::application::{HandlerError, ResponseWriter};
use crate::domain::routing::{Reply, Request};

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// 健康检查
pub fn ping(_request: &Request, _response: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
    Ok(Reply::json(&PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })?)
}

/// `?name=` 问候页
pub fn hello(request: &Request, _response: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
    let name = request
        .query_param("name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("world");
    Ok(Reply::html(format!("<h1>Hello, {}!</h1>", escape_html(name))))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
