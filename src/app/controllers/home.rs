//! Home Controller

use crate::application::{Controller, HandlerError, ResponseWriter};
use crate::domain::routing::{Reply, Request};

#[derive(Debug, Default)]
pub struct HomeController;

impl Controller for HomeController {
    const NAME: &'static str = "HomeController";
}

impl HomeController {
    /// 首页视图
    pub fn index(&mut self, _request: &Request, response: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
        Ok(Reply::html(response.view("home")?))
    }

    pub fn about(&mut self, _request: &Request, _response: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
        Ok(Reply::html(format!(
            "<h1>About</h1><p>waypost {}</p>",
            env!("CARGO_PKG_VERSION")
        )))
    }
}
