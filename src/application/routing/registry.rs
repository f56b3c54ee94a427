//! Route Registry
//!
//! 注册阶段使用的可变路由表。`register` 返回刚注册路由的句柄，
//! middleware 通过句柄绑定到该路由，不依赖全局的“当前路由”状态。
//! 注册结束后调用 `freeze` 得到只读的 RouteTable。

use crate::application::error::ConfigurationError;
use crate::application::routing::catalog::{BoundMiddleware, MiddlewareCatalog};
use crate::application::routing::handler::Handler;
use crate::application::routing::table::RouteTable;
use crate::domain::routing::{MethodBucket, RouteKey};

pub struct RouteRegistry {
    middlewares: MiddlewareCatalog,
    table: RouteTable,
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("middlewares", &self.middlewares.names())
            .field("table", &self.table)
            .finish()
    }
}

impl RouteRegistry {
    pub fn new(middlewares: MiddlewareCatalog) -> Self {
        Self {
            middlewares,
            table: RouteTable::default(),
        }
    }

    /// 注册路由；同一 (bucket, path) 重复注册时后者覆盖前者
    pub fn register(
        &mut self,
        bucket: MethodBucket,
        path: impl Into<String>,
        handler: Handler,
    ) -> RouteHandle<'_> {
        let key = RouteKey::new(bucket, path);
        let description = handler.describe();

        match self.table.insert(&key, handler) {
            Some(previous) => tracing::debug!(
                route = %key,
                previous = %previous.describe(),
                handler = %description,
                "Route overwritten"
            ),
            None => tracing::debug!(route = %key, handler = %description, "Route registered"),
        }

        RouteHandle {
            registry: self,
            key,
        }
    }

    pub fn get(&mut self, path: impl Into<String>, handler: Handler) -> RouteHandle<'_> {
        self.register(MethodBucket::Get, path, handler)
    }

    pub fn post(&mut self, path: impl Into<String>, handler: Handler) -> RouteHandle<'_> {
        self.register(MethodBucket::Post, path, handler)
    }

    pub fn any(&mut self, path: impl Into<String>, handler: Handler) -> RouteHandle<'_> {
        self.register(MethodBucket::Any, path, handler)
    }

    pub fn lookup(&self, bucket: MethodBucket, path: &str) -> Option<&Handler> {
        self.table.lookup(bucket, path)
    }

    pub fn lookup_any(&self, path: &str) -> Option<&Handler> {
        self.table.lookup_any(path)
    }

    pub fn middleware_for(&self, bucket: MethodBucket, path: &str) -> Option<&BoundMiddleware> {
        self.table.middleware_for(bucket, path)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 结束注册阶段
    pub fn freeze(self) -> RouteTable {
        self.table
    }
}

/// 刚注册的路由的句柄
pub struct RouteHandle<'a> {
    registry: &'a mut RouteRegistry,
    key: RouteKey,
}

impl<'a> RouteHandle<'a> {
    /// 为该路由绑定 middleware
    ///
    /// 名称首字母大写后在 MiddlewareCatalog 中查找；找不到时返回
    /// UnknownMiddleware 且不做任何绑定。每条路由只保留一个 middleware。
    pub fn middleware(self, name: &str) -> Result<(), ConfigurationError> {
        let bound = self.registry.middlewares.resolve(name)?;
        tracing::debug!(route = %self.key, middleware = %bound.name(), "Middleware attached");
        self.registry.table.bind(&self.key, bound);
        Ok(())
    }
}
