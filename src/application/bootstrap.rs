//! Bootstrap - 路由加载与引擎构建
//!
//! 启动时按名称字典序执行所有路由定义源，每个源恰好一次。
//! 顺序决定了同一 (bucket, path) 的覆盖结果，因此必须稳定。
//! 任何 ConfigurationError 都会中止加载，服务不会启动。

use std::sync::Arc;

use crate::application::dispatcher::{DispatchOutcome, Dispatcher};
use crate::application::error::ConfigurationError;
use crate::application::ports::ResponseWriter;
use crate::application::routing::{HandlerCatalog, MiddlewareCatalog, RouteRegistry, RouteTable};
use crate::domain::routing::Request;

/// 路由定义源
pub trait RouteSource: Send + Sync {
    /// 用于排序与日志的名称（文件源为文件名）
    fn name(&self) -> &str;

    fn register(
        &self,
        routes: &mut RouteRegistry,
        handlers: &HandlerCatalog,
    ) -> Result<(), ConfigurationError>;
}

/// 用 Rust 代码定义路由的源
pub struct FnRouteSource<F> {
    name: String,
    define: F,
}

impl<F> FnRouteSource<F>
where
    F: Fn(&mut RouteRegistry, &HandlerCatalog) -> Result<(), ConfigurationError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, define: F) -> Self {
        Self {
            name: name.into(),
            define,
        }
    }
}

impl<F> RouteSource for FnRouteSource<F>
where
    F: Fn(&mut RouteRegistry, &HandlerCatalog) -> Result<(), ConfigurationError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn register(
        &self,
        routes: &mut RouteRegistry,
        handlers: &HandlerCatalog,
    ) -> Result<(), ConfigurationError> {
        (self.define)(routes, handlers)
    }
}

/// 引擎构建器
pub struct Bootstrap {
    handlers: HandlerCatalog,
    middlewares: MiddlewareCatalog,
    sources: Vec<Box<dyn RouteSource>>,
}

impl Bootstrap {
    pub fn new(handlers: HandlerCatalog, middlewares: MiddlewareCatalog) -> Self {
        Self {
            handlers,
            middlewares,
            sources: Vec::new(),
        }
    }

    pub fn source(mut self, source: impl RouteSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn sources<S>(mut self, sources: impl IntoIterator<Item = S>) -> Self
    where
        S: RouteSource + 'static,
    {
        for source in sources {
            self.sources.push(Box::new(source));
        }
        self
    }

    /// 执行所有路由源并冻结路由表
    pub fn build(mut self) -> Result<Engine, ConfigurationError> {
        // 稳定排序：同名源保持添加顺序
        self.sources.sort_by(|a, b| a.name().cmp(b.name()));

        let mut routes = RouteRegistry::new(self.middlewares);
        for source in &self.sources {
            let before = routes.len();
            source.register(&mut routes, &self.handlers).map_err(|e| {
                tracing::error!(source = %source.name(), error = %e, "Failed to load routes");
                e
            })?;
            tracing::info!(
                source = %source.name(),
                routes = routes.len() - before,
                "Route source loaded"
            );
        }

        let table = Arc::new(routes.freeze());
        tracing::info!(
            sources = self.sources.len(),
            routes = table.len(),
            "Route table frozen"
        );

        Ok(Engine::new(table))
    }
}

/// 路由引擎：只读路由表 + Dispatcher，整个进程共享一个实例
pub struct Engine {
    table: Arc<RouteTable>,
    dispatcher: Arc<Dispatcher>,
}

impl Engine {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(table.clone())),
            table,
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    pub fn establish(&self, request: &Request, response: &mut dyn ResponseWriter) -> DispatchOutcome {
        self.dispatcher.establish(request, response)
    }
}
