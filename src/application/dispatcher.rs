//! Dispatcher
//!
//! 单次请求的分发流程：
//!
//! ```text
//! START → RESOLVE ─┬─ 未命中 → 404 视图 → DONE
//!                  └─ 命中 → MIDDLEWARE (可 Halt) → HANDLER → CLASSIFY/EMIT → DONE
//! ```
//!
//! handler 返回错误时在此处统一转为 400 或 500 响应，错误细节只写日志。

use std::sync::Arc;

use crate::application::error::HandlerError;
use crate::application::ports::{
    MiddlewareOutcome, ResponseWriter, NOT_FOUND_VIEW, SERVER_ERROR_VIEW,
};
use crate::application::routing::{Handler, RouteTable};
use crate::domain::routing::{Reply, Request, CONTENT_TYPE_HTML};

/// 500 视图也无法渲染时使用的响应体
const SERVER_ERROR_FALLBACK: &str = "<h1>500 Internal Server Error</h1>";

/// 请求内容无效时的响应体
const BAD_REQUEST_BODY: &str = "<h1>400 Bad Request</h1>";

/// 分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 没有匹配的路由，已输出 404
    NotFound,
    /// middleware 中止了请求
    Halted,
    /// 直接渲染了视图
    View,
    Json,
    Html,
    /// 请求内容无效，已输出 400
    Rejected,
    /// handler 失败，已输出 500
    Failed,
}

pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    /// 分发一个请求并写出响应
    pub fn establish(&self, request: &Request, response: &mut dyn ResponseWriter) -> DispatchOutcome {
        match self.try_establish(request, response) {
            Ok(outcome) => {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path,
                    status = response.status_code(),
                    outcome = ?outcome,
                    "Request dispatched"
                );
                outcome
            }
            Err(HandlerError::BadRequest(message)) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %message,
                    "Bad request"
                );
                write_bad_request(response);
                DispatchOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(
                    method = %request.method,
                    path = %request.path,
                    error = %e,
                    "Handler failed"
                );
                write_server_error(response);
                DispatchOutcome::Failed
            }
        }
    }

    fn try_establish(
        &self,
        request: &Request,
        response: &mut dyn ResponseWriter,
    ) -> Result<DispatchOutcome, HandlerError> {
        let resolution = self.table.resolve(&request.method, &request.path);

        // 未命中即终止，不再执行 middleware 与 handler
        let Some(handler) = resolution.handler else {
            response.set_status_code(404);
            response.set_content_type(CONTENT_TYPE_HTML);
            let body = response.view(NOT_FOUND_VIEW)?;
            response.write(&body);
            return Ok(DispatchOutcome::NotFound);
        };

        if let Some(middleware) = resolution.middleware {
            let instance = middleware.instantiate();
            if instance.handle(request, response) == MiddlewareOutcome::Halt {
                tracing::debug!(
                    path = %request.path,
                    middleware = %middleware.name(),
                    "Request halted by middleware"
                );
                return Ok(DispatchOutcome::Halted);
            }
        }

        let reply = match handler {
            Handler::View(name) => {
                let body = response.view(name)?;
                response.set_content_type(CONTENT_TYPE_HTML);
                response.write(&body);
                return Ok(DispatchOutcome::View);
            }
            Handler::Callable(callable) => callable.call(request, response)?,
            Handler::Controller(action) => action.call(request, response)?,
        };

        emit(&reply, response)?;

        Ok(match reply {
            Reply::Json(_) => DispatchOutcome::Json,
            Reply::Html(_) => DispatchOutcome::Html,
        })
    }
}

/// 按结果变体设置 Content-Type 并写出
fn emit(reply: &Reply, response: &mut dyn ResponseWriter) -> Result<(), HandlerError> {
    let body = reply.render_body()?;
    response.set_content_type(reply.content_type());
    response.write(&body);
    Ok(())
}

/// 丢弃已写入内容与响应头，输出固定的 400 页面
fn write_bad_request(response: &mut dyn ResponseWriter) {
    response.clear_body();
    response.clear_headers();
    response.set_status_code(400);
    response.set_content_type(CONTENT_TYPE_HTML);
    response.write(BAD_REQUEST_BODY);
}

/// 丢弃已写入内容与响应头，输出通用 500 页面
pub fn write_server_error(response: &mut dyn ResponseWriter) {
    response.clear_body();
    response.clear_headers();
    response.set_status_code(500);
    response.set_content_type(CONTENT_TYPE_HTML);
    match response.view(SERVER_ERROR_VIEW) {
        Ok(body) => response.write(&body),
        Err(e) => {
            tracing::warn!(error = %e, "Server error view unavailable");
            response.write(SERVER_ERROR_FALLBACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Middleware;
    use crate::application::routing::{Controller, MiddlewareCatalog, RouteRegistry};
    use crate::application::testing::MemoryResponse;
    use crate::domain::routing::RequestMethod;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    static USER_CONTROLLERS: AtomicUsize = AtomicUsize::new(0);

    /// 每个测试独立的事件记录
    type EventLog = Arc<Mutex<Vec<String>>>;

    struct Auth {
        log: EventLog,
    }

    impl Middleware for Auth {
        fn handle(&self, request: &Request, response: &mut dyn ResponseWriter) -> MiddlewareOutcome {
            self.log.lock().unwrap().push(format!("auth {}", request.path));
            if request.header("authorization").is_some() {
                MiddlewareOutcome::Continue
            } else {
                response.set_status_code(401);
                response.write("unauthorized");
                MiddlewareOutcome::Halt
            }
        }
    }

    struct UserController;

    impl Default for UserController {
        fn default() -> Self {
            USER_CONTROLLERS.fetch_add(1, Ordering::SeqCst);
            Self
        }
    }

    impl Controller for UserController {
        const NAME: &'static str = "UserController";
    }

    impl UserController {
        fn create(&mut self, _req: &Request, _res: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
            Ok(Reply::json(&json!({"id": 1}))?)
        }
    }

    fn dispatcher(log: &EventLog, define: impl FnOnce(&mut RouteRegistry)) -> Dispatcher {
        let log = log.clone();
        let mut catalog = MiddlewareCatalog::new();
        catalog.register("auth", move || Auth { log: log.clone() });
        let mut routes = RouteRegistry::new(catalog);
        define(&mut routes);
        Dispatcher::new(Arc::new(routes.freeze()))
    }

    fn recording_handler(log: &EventLog, name: &'static str, body: &'static str) -> Handler {
        let log = log.clone();
        Handler::callable(name, move |req, _| {
            log.lock().unwrap().push(format!("handler {}", req.path));
            Ok(Reply::html(body))
        })
    }

    fn run(dispatcher: &Dispatcher, request: Request) -> (DispatchOutcome, MemoryResponse) {
        let mut response = MemoryResponse::new().with_view("home", "<p>home</p>");
        let outcome = dispatcher.establish(&request, &mut response);
        (outcome, response)
    }

    #[test]
    fn test_get_callable_returns_html() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get("/hello", Handler::callable("hello", |_, _| Ok(Reply::html("hi"))));
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/hello"));
        assert_eq!(outcome, DispatchOutcome::Html);
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "text/html");
        assert_eq!(response.body, "hi");
    }

    #[test]
    fn test_post_controller_returns_json() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.post("/users", Handler::controller("create", UserController::create));
        });

        let before = USER_CONTROLLERS.load(Ordering::SeqCst);
        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Post, "/users"));
        let (_, second) = run(&dispatcher, Request::new(RequestMethod::Post, "/users"));

        assert_eq!(outcome, DispatchOutcome::Json);
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "application/json");
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"id": 1}));
        assert_eq!(second.body, response.body);
        // 每个请求一个新实例
        assert_eq!(USER_CONTROLLERS.load(Ordering::SeqCst) - before, 2);
    }

    #[test]
    fn test_missing_route_is_terminal_404() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get("/hello", Handler::view("home"));
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/missing"));
        assert_eq!(outcome, DispatchOutcome::NotFound);
        assert_eq!(response.status, 404);
        assert_eq!(response.body, "<h1>404 Not Found</h1>");
    }

    #[test]
    fn test_not_found_does_not_fall_through_to_middleware() {
        // 路径上绑定了 middleware，但当前方法没有路由：middleware 与 handler 都不执行
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes
                .post("/only-post", recording_handler(&log, "only-post", "ok"))
                .middleware("auth")
                .unwrap();
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/only-post"));
        assert_eq!(outcome, DispatchOutcome::NotFound);
        assert_eq!(response.status, 404);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_wildcard_route_wins_for_get() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.any("/ping", Handler::callable("pong", |_, _| Ok(Reply::html("pong"))));
            routes.get("/ping", Handler::callable("only-get", |_, _| Ok(Reply::html("only-get"))));
        });

        let (_, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/ping"));
        assert_eq!(response.body, "pong");
    }

    #[test]
    fn test_middleware_runs_before_handler() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes
                .get("/secure", recording_handler(&log, "secure", "secret"))
                .middleware("auth")
                .unwrap();
        });

        let request =
            Request::new(RequestMethod::Get, "/secure").with_header("Authorization", "Bearer t");
        let (outcome, response) = run(&dispatcher, request);

        assert_eq!(outcome, DispatchOutcome::Html);
        assert_eq!(response.body, "secret");
        assert_eq!(*log.lock().unwrap(), vec!["auth /secure", "handler /secure"]);
    }

    #[test]
    fn test_middleware_halt_skips_handler() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes
                .get("/guarded", recording_handler(&log, "guarded", "secret"))
                .middleware("auth")
                .unwrap();
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/guarded"));
        assert_eq!(outcome, DispatchOutcome::Halted);
        assert_eq!(response.status, 401);
        assert_eq!(response.body, "unauthorized");
        assert_eq!(*log.lock().unwrap(), vec!["auth /guarded"]);
    }

    #[test]
    fn test_overwrite_keeps_bound_middleware() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.any("/mixed", Handler::view("home")).middleware("auth").unwrap();
            routes.any("/mixed", Handler::view("home"));
        });

        let (outcome, _) = run(&dispatcher, Request::new(RequestMethod::Post, "/mixed"));
        // 覆盖注册不会清除已绑定的 middleware
        assert_eq!(outcome, DispatchOutcome::Halted);
    }

    #[test]
    fn test_wildcard_middleware_applies_to_get_request() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.any("/mixed", Handler::view("home")).middleware("auth").unwrap();
            routes.get("/mixed", recording_handler(&log, "mixed", "get"));
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/mixed"));
        assert_eq!(outcome, DispatchOutcome::Halted);
        assert_eq!(response.status, 401);
        assert_eq!(*log.lock().unwrap(), vec!["auth /mixed"]);
    }

    #[test]
    fn test_view_handler_renders_directly() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get("/", Handler::view("home"));
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/"));
        assert_eq!(outcome, DispatchOutcome::View);
        assert_eq!(response.content_type, "text/html");
        assert_eq!(response.body, "<p>home</p>");
    }

    #[test]
    fn test_handler_error_becomes_500_without_detail() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get(
                "/boom",
                Handler::callable("boom", |_, res| {
                    res.write("partial");
                    Err(HandlerError::internal("database password is hunter2"))
                }),
            );
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/boom"));
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "<h1>500 Server Error</h1>");
        assert!(!response.body.contains("hunter2"));
    }

    #[test]
    fn test_server_error_drops_handler_headers() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get(
                "/leaky",
                Handler::callable("leaky", |_, res| {
                    res.set_header("x-upstream-dsn", "postgres://admin:pw@db");
                    Err(HandlerError::internal("connection refused"))
                }),
            );
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/leaky"));
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(response.status, 500);
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_invalid_json_body_becomes_400() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.post(
                "/users",
                Handler::callable("create", |req, res| {
                    res.set_header("x-draft", "1");
                    let value: Value = serde_json::from_str(&req.body)?;
                    Ok(Reply::json(&value)?)
                }),
            );
        });

        let request = Request::new(RequestMethod::Post, "/users").with_body("not json");
        let (outcome, response) = run(&dispatcher, request);
        assert_eq!(outcome, DispatchOutcome::Rejected);
        assert_eq!(response.status, 400);
        assert_eq!(response.content_type, "text/html");
        assert_eq!(response.body, BAD_REQUEST_BODY);
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_bad_request_hides_message() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get(
                "/search",
                Handler::callable("search", |_, _| Err(HandlerError::bad_request("missing q"))),
            );
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/search"));
        assert_eq!(outcome, DispatchOutcome::Rejected);
        assert_eq!(response.status, 400);
        assert!(!response.body.contains("missing q"));
    }

    #[test]
    fn test_unrecognized_result_becomes_500() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get("/scalar", Handler::callable("scalar", |_, _| Ok(Reply::json(&7)?)));
        });

        let (outcome, response) = run(&dispatcher, Request::new(RequestMethod::Get, "/scalar"));
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(response.status, 500);
    }

    #[test]
    fn test_missing_view_becomes_500() {
        let log = EventLog::default();
        let dispatcher = dispatcher(&log, |routes| {
            routes.get("/ghost", Handler::view("ghost"));
        });

        let mut response = MemoryResponse::new().without_view("default/500_error");
        let outcome =
            dispatcher.establish(&Request::new(RequestMethod::Get, "/ghost"), &mut response);
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(response.status, 500);
        assert_eq!(response.body, SERVER_ERROR_FALLBACK);
    }
}
