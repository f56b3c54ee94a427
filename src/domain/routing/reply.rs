//! Routing Context - Reply
//!
//! handler 的返回值。内容类型由变体决定，而不是运行时检查值的形状。

use serde::Serialize;
use serde_json::Value;

use super::RoutingError;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// handler 结果
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// 结构化数据（对象或数组），以 JSON 输出
    Json(Value),
    /// 文本，原样以 HTML 输出
    Html(String),
}

impl Reply {
    /// 序列化为 JSON 结果
    ///
    /// 只接受对象或数组；标量等其他形状直接报错。
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, RoutingError> {
        let value = serde_json::to_value(value)
            .map_err(|e| RoutingError::UnrecognizedResult(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, RoutingError> {
        match value {
            Value::Object(_) | Value::Array(_) => Ok(Self::Json(value)),
            other => Err(RoutingError::UnrecognizedResult(format!(
                "expected object or array, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self::Html(text.into())
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => CONTENT_TYPE_JSON,
            Self::Html(_) => CONTENT_TYPE_HTML,
        }
    }

    /// 输出的响应体
    pub fn render_body(&self) -> Result<String, RoutingError> {
        match self {
            Self::Json(value) => serde_json::to_string(value)
                .map_err(|e| RoutingError::UnrecognizedResult(e.to_string())),
            Self::Html(text) => Ok(text.clone()),
        }
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self::Html(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Self::Html(text.to_string())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
