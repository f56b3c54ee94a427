//! Application State
//!
//! 所有请求共享的只读状态：Dispatcher（持有冻结的路由表）与视图渲染器

use std::sync::Arc;

use crate::application::{Dispatcher, Engine, ViewRendererPort};

pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub views: Arc<dyn ViewRendererPort>,
}

impl AppState {
    pub fn new(engine: &Engine, views: Arc<dyn ViewRendererPort>) -> Self {
        Self {
            dispatcher: engine.dispatcher(),
            views,
        }
    }
}
