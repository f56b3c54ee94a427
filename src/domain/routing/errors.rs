//! Routing Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("不支持的请求方法: {0}")]
    UnsupportedMethod(String),

    #[error("无法识别的 handler 返回值: {0}")]
    UnrecognizedResult(String),
}
