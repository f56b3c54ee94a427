//! Waypost - 按方法与路径分发请求的路由引擎
//!
//! 架构设计: 分层 + Ports & Adapters
//!
//! 领域层 (domain/):
//! - Routing Context: 方法桶、路由键、请求描述、handler 结果
//!
//! 应用层 (application/):
//! - Ports: ResponseWriter, ViewRenderer, Middleware
//! - Routing: RouteRegistry → RouteTable，middleware / handler 名称表
//! - Dispatcher: 解析、middleware、handler、输出
//! - Bootstrap: 按名称顺序加载路由源
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: axum fallback → Dispatcher
//! - Routes: TOML 路由文件
//! - Views: 文件系统视图
//! - Middlewares: Auth, Log
//!
//! 示例站点 (app/): 二进制程序使用的 controller 与 callable

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{Bootstrap, Dispatcher, Engine};
pub use config::{load_config, AppConfig};
