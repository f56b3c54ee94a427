//! Routing Context - Value Objects

use std::collections::HashMap;
use std::str::FromStr;

use super::RoutingError;

/// 路由注册所用的方法桶
///
/// 固定集合：`get`、`post` 以及匹配任意方法的通配桶 `any`。
/// 新增方法需要修改此处代码，而不是配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodBucket {
    Get,
    Post,
    Any,
}

impl MethodBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Any => "any",
        }
    }
}

impl FromStr for MethodBucket {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "any" => Ok(Self::Any),
            other => Err(RoutingError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for MethodBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 规范化后的请求方法
///
/// 只有 GET / POST 能命中方法专属的路由，其余方法只会匹配 `any` 路由。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Other(String),
}

impl RequestMethod {
    pub fn parse(method: &str) -> Self {
        match method.to_lowercase().as_str() {
            "get" => Self::Get,
            "post" => Self::Post,
            other => Self::Other(other.to_string()),
        }
    }

    /// 对应的方法桶；非 GET/POST 返回 None
    pub fn bucket(&self) -> Option<MethodBucket> {
        match self {
            Self::Get => Some(MethodBucket::Get),
            Self::Post => Some(MethodBucket::Post),
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Other(method) => method,
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 路由表的键：(方法桶, 路径)
///
/// 路径按字节精确比较，不做尾斜杠或大小写规范化。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub bucket: MethodBucket,
    pub path: String,
}

impl RouteKey {
    pub fn new(bucket: MethodBucket, path: impl Into<String>) -> Self {
        Self {
            bucket,
            path: path.into(),
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.bucket, self.path)
    }
}

/// 规范化后的请求描述
///
/// 由 HTTP 适配层在分发前构造，handler 与 middleware 只读访问。
#[derive(Debug, Clone)]
pub struct Request {
    pub method: RequestMethod,
    /// 不含查询串的路径
    pub path: String,
    pub query: HashMap<String, String>,
    /// header 名统一小写
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Request {
    pub fn new(method: RequestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
