//! App - 二进制程序提供的示例站点
//!
//! 路由文件通过名称引用这里注册的 callable 与 controller action

pub mod callables;
pub mod controllers;

use crate::application::error::ConfigurationError;
use crate::application::routing::{Handler, HandlerCatalog, RouteRegistry};
use crate::application::{FnRouteSource, RouteSource};

use controllers::{HomeController, UserController};

/// 路由文件可引用的全部 handler
pub fn handler_catalog() -> HandlerCatalog {
    let mut catalog = HandlerCatalog::new();
    catalog
        .callable("ping", callables::ping)
        .callable("hello", callables::hello)
        .action::<HomeController>("index", HomeController::index)
        .action::<HomeController>("about", HomeController::about)
        .action::<UserController>("list", UserController::list)
        .action::<UserController>("create", UserController::create);
    catalog
}

fn register_builtin(routes: &mut RouteRegistry, _handlers: &HandlerCatalog) -> Result<(), ConfigurationError> {
    routes.any("/api/ping", Handler::callable("ping", callables::ping));
    Ok(())
}

/// 用 Rust 代码定义的路由
pub fn builtin_routes() -> impl RouteSource {
    FnRouteSource::new("builtin", register_builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::routing::MiddlewareCatalog;
    use crate::application::testing::MemoryResponse;
    use crate::application::{Bootstrap, DispatchOutcome};
    use crate::domain::routing::{MethodBucket, Request, RequestMethod};

    #[test]
    fn test_builtin_ping_matches_any_method() {
        let engine = Bootstrap::new(handler_catalog(), MiddlewareCatalog::new())
            .source(builtin_routes())
            .build()
            .unwrap();

        for method in [RequestMethod::Get, RequestMethod::Post, RequestMethod::parse("HEAD")] {
            let mut response = MemoryResponse::new();
            let outcome = engine.establish(&Request::new(method, "/api/ping"), &mut response);
            assert_eq!(outcome, DispatchOutcome::Json);
            assert_eq!(response.content_type, "application/json");
        }
    }

    #[test]
    fn test_catalog_resolves_all_actions() {
        let catalog = handler_catalog();
        assert!(catalog.resolve_callable("hello").is_ok());
        assert!(catalog.resolve_action("HomeController", "about").is_ok());
        assert!(catalog.resolve_action("UserController", "create").is_ok());
    }

    #[test]
    fn test_shipped_route_files_load() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/routes");
        let files = crate::infrastructure::discover_route_files(dir).unwrap();

        let engine = Bootstrap::new(
            handler_catalog(),
            crate::infrastructure::default_middlewares(None),
        )
        .source(builtin_routes())
        .sources(files)
        .build()
        .unwrap();

        let table = engine.table();
        assert!(table.lookup(MethodBucket::Get, "/").is_some());
        assert!(table.lookup_any("/hello").is_some());
        assert_eq!(
            table
                .middleware_for(MethodBucket::Post, "/api/users")
                .map(|m| m.name()),
            Some("Auth")
        );
    }
}
