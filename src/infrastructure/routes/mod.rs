//! Routes - 路由定义文件加载

mod toml_source;

use std::path::Path;

use crate::application::error::ConfigurationError;

pub use toml_source::{RouteDefinition, TomlRouteSource};

/// 路由文件扩展名
const ROUTE_FILE_EXTENSION: &str = "toml";

/// 读取目录下所有路由文件（不递归），按文件名字典序返回
pub fn discover_route_files(dir: impl AsRef<Path>) -> Result<Vec<TomlRouteSource>, ConfigurationError> {
    let dir = dir.as_ref();
    let io_error = |e: std::io::Error| ConfigurationError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_route_file = path.is_file()
            && path
                .extension()
                .map(|ext| ext == ROUTE_FILE_EXTENSION)
                .unwrap_or(false);
        if is_route_file {
            paths.push(path);
        }
    }
    paths.sort();

    tracing::debug!(dir = %dir.display(), files = paths.len(), "Route files discovered");

    paths.iter().map(TomlRouteSource::load).collect()
}
