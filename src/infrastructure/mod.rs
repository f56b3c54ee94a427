//! Infrastructure Layer - 基础设施层
//!
//! 提供端口的具体实现：
//! - http: axum 适配（fallback → Dispatcher）
//! - middlewares: 内置 middleware（Auth、Log）
//! - routes: TOML 路由定义文件
//! - views: 文件系统视图渲染

pub mod http;
pub mod middlewares;
pub mod routes;
pub mod views;

pub use http::{AppState, HttpServer};
pub use middlewares::default_middlewares;
pub use routes::{discover_route_files, TomlRouteSource};
pub use views::FileViewRenderer;
