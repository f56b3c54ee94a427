//! Route Table
//!
//! 注册阶段结束后冻结的只读路由表，分发期间无锁并发读取

use std::collections::HashMap;

use crate::application::routing::catalog::BoundMiddleware;
use crate::application::routing::handler::Handler;
use crate::domain::routing::{MethodBucket, RequestMethod, RouteKey};

/// 单次请求解析结果
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub handler: Option<&'a Handler>,
    pub middleware: Option<&'a BoundMiddleware>,
}

/// 只读路由表
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<MethodBucket, HashMap<String, Handler>>,
    middlewares: HashMap<MethodBucket, HashMap<String, BoundMiddleware>>,
}

impl RouteTable {
    /// 插入或覆盖，返回被覆盖的旧 handler
    pub(crate) fn insert(&mut self, key: &RouteKey, handler: Handler) -> Option<Handler> {
        self.routes
            .entry(key.bucket)
            .or_default()
            .insert(key.path.clone(), handler)
    }

    pub(crate) fn bind(&mut self, key: &RouteKey, middleware: BoundMiddleware) {
        self.middlewares
            .entry(key.bucket)
            .or_default()
            .insert(key.path.clone(), middleware);
    }

    /// 精确匹配 (bucket, path)
    pub fn lookup(&self, bucket: MethodBucket, path: &str) -> Option<&Handler> {
        self.routes.get(&bucket).and_then(|paths| paths.get(path))
    }

    /// 通配桶查找
    pub fn lookup_any(&self, path: &str) -> Option<&Handler> {
        self.lookup(MethodBucket::Any, path)
    }

    pub fn middleware_for(&self, bucket: MethodBucket, path: &str) -> Option<&BoundMiddleware> {
        self.middlewares.get(&bucket).and_then(|paths| paths.get(path))
    }

    /// 按优先级解析 handler 与 middleware
    ///
    /// `any` 路由优先于方法专属路由：同一路径同时注册了 `any` 与 `get` 时，
    /// GET 请求仍然命中 `any`。middleware 独立按同样的顺序解析。
    pub fn resolve(&self, method: &RequestMethod, path: &str) -> Resolution<'_> {
        let bucket = method.bucket();

        let handler = self
            .lookup_any(path)
            .or_else(|| bucket.and_then(|b| self.lookup(b, path)));

        let middleware = self
            .middleware_for(MethodBucket::Any, path)
            .or_else(|| bucket.and_then(|b| self.middleware_for(b, path)));

        Resolution {
            handler,
            middleware,
        }
    }

    /// 路由总数
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 所有已注册的路由键，按 (path, bucket) 排序
    pub fn keys(&self) -> Vec<RouteKey> {
        let mut keys: Vec<RouteKey> = self
            .routes
            .iter()
            .flat_map(|(bucket, paths)| paths.keys().map(move |path| RouteKey::new(*bucket, path.clone())))
            .collect();
        keys.sort_by(|a, b| a.path.cmp(&b.path).then(a.bucket.as_str().cmp(b.bucket.as_str())));
        keys
    }
}
