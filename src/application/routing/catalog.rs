//! Catalogs
//!
//! 启动时显式填充的名称 → 能力映射：
//! - MiddlewareCatalog: middleware 名称 → 工厂
//! - HandlerCatalog: 路由文件中引用的 callable / controller action

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::error::{ConfigurationError, HandlerError};
use crate::application::ports::{Middleware, ResponseWriter};
use crate::application::routing::handler::{
    Action, CallableHandler, Controller, ControllerAction, Handler,
};
use crate::domain::routing::{Reply, Request};

/// middleware 工厂，每次分发调用一次
pub type MiddlewareFactory = Arc<dyn Fn() -> Box<dyn Middleware> + Send + Sync>;

/// 已解析并绑定到路由的 middleware
#[derive(Clone)]
pub struct BoundMiddleware {
    name: String,
    factory: MiddlewareFactory,
}

impl BoundMiddleware {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 新建一个 middleware 实例
    pub fn instantiate(&self) -> Box<dyn Middleware> {
        (self.factory)()
    }
}

impl std::fmt::Debug for BoundMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundMiddleware")
            .field("name", &self.name)
            .finish()
    }
}

/// 首字母大写，其余保持不变
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// middleware 名称表
#[derive(Clone, Default)]
pub struct MiddlewareCatalog {
    factories: HashMap<String, MiddlewareFactory>,
}

impl MiddlewareCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册 middleware，名称按首字母大写存储
    pub fn register<F, M>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + 'static,
    {
        let factory: MiddlewareFactory =
            Arc::new(move || Box::new(factory()) as Box<dyn Middleware>);
        self.factories.insert(capitalize_first(name), factory);
        self
    }

    /// 解析 middleware 名称
    ///
    /// `auth` 与 `Auth` 都解析到 `Auth`；未注册时返回 UnknownMiddleware
    pub fn resolve(&self, name: &str) -> Result<BoundMiddleware, ConfigurationError> {
        let resolved = capitalize_first(name);
        match self.factories.get(&resolved) {
            Some(factory) => Ok(BoundMiddleware {
                name: resolved,
                factory: factory.clone(),
            }),
            None => Err(ConfigurationError::UnknownMiddleware {
                name: name.to_string(),
                resolved,
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&capitalize_first(name))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// 路由文件可引用的 handler 表
#[derive(Clone, Default)]
pub struct HandlerCatalog {
    callables: HashMap<String, CallableHandler>,
    controllers: HashMap<&'static str, HashMap<String, ControllerAction>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callable<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&Request, &mut dyn ResponseWriter) -> Result<Reply, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        self.callables
            .insert(name.to_string(), CallableHandler::new(name, func));
        self
    }

    /// 注册 controller action，controller 按 `C::NAME` 索引
    pub fn action<C: Controller>(&mut self, action: &str, method: Action<C>) -> &mut Self {
        self.controllers
            .entry(C::NAME)
            .or_default()
            .insert(action.to_string(), ControllerAction::new(action, method));
        self
    }

    pub fn resolve_callable(&self, name: &str) -> Result<Handler, ConfigurationError> {
        self.callables
            .get(name)
            .cloned()
            .map(Handler::Callable)
            .ok_or_else(|| ConfigurationError::UnknownCallable(name.to_string()))
    }

    pub fn resolve_action(&self, controller: &str, action: &str) -> Result<Handler, ConfigurationError> {
        let actions = self
            .controllers
            .get(controller)
            .ok_or_else(|| ConfigurationError::UnknownController(controller.to_string()))?;

        actions
            .get(action)
            .cloned()
            .map(Handler::Controller)
            .ok_or_else(|| ConfigurationError::UnknownAction {
                controller: controller.to_string(),
                action: action.to_string(),
            })
    }
}
