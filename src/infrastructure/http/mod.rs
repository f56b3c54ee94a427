//! HTTP Layer - axum 适配
//!
//! 把 HTTP 请求转换为路由请求描述，交给 Dispatcher，
//! 再把 BufferedResponse 转回 HTTP 响应。

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use handlers::REQUEST_ID_HEADER;
pub use response::BufferedResponse;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
