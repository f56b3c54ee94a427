//! Route Handlers
//!
//! 路由命中后执行的逻辑，三种形态：
//! - View: 直接渲染命名视图
//! - Callable: 独立函数 (request, response) → Reply
//! - Controller: (controller 类型, action 名)，每次分发新建 controller 实例

use std::fmt;
use std::sync::Arc;

use crate::application::error::HandlerError;
use crate::application::ports::ResponseWriter;
use crate::domain::routing::{Reply, Request};

/// 擦除类型后的 handler 函数
pub type HandlerFn =
    dyn Fn(&Request, &mut dyn ResponseWriter) -> Result<Reply, HandlerError> + Send + Sync;

/// Controller action 签名
pub type Action<C> = fn(&mut C, &Request, &mut dyn ResponseWriter) -> Result<Reply, HandlerError>;

/// Controller 类型
///
/// 无参构造（`Default`），`NAME` 用于路由文件中按名称引用
pub trait Controller: Default + 'static {
    const NAME: &'static str;
}

/// 命名的独立函数
#[derive(Clone)]
pub struct CallableHandler {
    name: String,
    func: Arc<HandlerFn>,
}

impl CallableHandler {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Request, &mut dyn ResponseWriter) -> Result<Reply, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(
        &self,
        request: &Request,
        response: &mut dyn ResponseWriter,
    ) -> Result<Reply, HandlerError> {
        (self.func)(request, response)
    }
}

/// controller + action
#[derive(Clone)]
pub struct ControllerAction {
    controller: &'static str,
    action: String,
    invoke: Arc<HandlerFn>,
}

impl ControllerAction {
    pub fn new<C: Controller>(action: impl Into<String>, method: Action<C>) -> Self {
        let invoke: Arc<HandlerFn> = Arc::new(
            move |request: &Request, response: &mut dyn ResponseWriter| {
                // 每次分发都新建实例，不跨请求复用
                let mut controller = C::default();
                method(&mut controller, request, response)
            },
        );

        Self {
            controller: C::NAME,
            action: action.into(),
            invoke,
        }
    }

    pub fn controller(&self) -> &'static str {
        self.controller
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn call(
        &self,
        request: &Request,
        response: &mut dyn ResponseWriter,
    ) -> Result<Reply, HandlerError> {
        (self.invoke)(request, response)
    }
}

/// 路由 handler
#[derive(Clone)]
pub enum Handler {
    View(String),
    Callable(CallableHandler),
    Controller(ControllerAction),
}

impl Handler {
    pub fn view(name: impl Into<String>) -> Self {
        Self::View(name.into())
    }

    pub fn callable<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Request, &mut dyn ResponseWriter) -> Result<Reply, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self::Callable(CallableHandler::new(name, func))
    }

    pub fn controller<C: Controller>(action: impl Into<String>, method: Action<C>) -> Self {
        Self::Controller(ControllerAction::new(action, method))
    }

    /// 用于日志的简短描述
    pub fn describe(&self) -> String {
        match self {
            Self::View(name) => format!("view:{}", name),
            Self::Callable(callable) => format!("callable:{}", callable.name()),
            Self::Controller(action) => format!("{}@{}", action.controller(), action.action()),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.describe()).finish()
    }
}
