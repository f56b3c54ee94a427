//! 测试辅助：内存 ResponseWriter

use std::collections::HashMap;

use crate::application::ports::{ResponseWriter, ViewError};
use crate::domain::routing::CONTENT_TYPE_HTML;

/// 记录所有写入的 ResponseWriter，视图为预置的 名称 → 内容
pub struct MemoryResponse {
    pub status: u16,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    views: HashMap<String, String>,
}

impl MemoryResponse {
    pub fn new() -> Self {
        let mut views = HashMap::new();
        views.insert("default/404_error".to_string(), "<h1>404 Not Found</h1>".to_string());
        views.insert("default/500_error".to_string(), "<h1>500 Server Error</h1>".to_string());
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML.to_string(),
            headers: Vec::new(),
            body: String::new(),
            views,
        }
    }

    pub fn with_view(mut self, name: &str, content: &str) -> Self {
        self.views.insert(name.to_string(), content.to_string());
        self
    }

    pub fn without_view(mut self, name: &str) -> Self {
        self.views.remove(name);
        self
    }
}

impl ResponseWriter for MemoryResponse {
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
        self.views
            .get(name)
            .cloned()
            .ok_or_else(|| ViewError::NotFound(name.to_string()))
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
