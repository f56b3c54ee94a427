//! HTTP 请求 → 路由请求描述

use axum::extract::Query;
use axum::http::{HeaderMap, Method, Uri};
use std::collections::HashMap;

use crate::domain::routing::{Request, RequestMethod};

/// 构造 Dispatcher 使用的请求描述
///
/// 查询串无法解析时视为空；同名 header 以 `, ` 合并；请求体按 UTF-8 有损解码。
pub fn build_request(method: &Method, uri: &Uri, headers: &HeaderMap, body: &[u8]) -> Request {
    let query = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map(|Query(query)| query)
        .unwrap_or_default();

    let mut merged: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        merged
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }

    Request {
        method: RequestMethod::parse(method.as_str()),
        path: uri.path().to_string(),
        query,
        headers: merged,
        body: String::from_utf8_lossy(body).into_owned(),
    }
}
