//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 路由定义文件配置
    #[serde(default)]
    pub routes: RoutesConfig,

    /// 视图配置
    #[serde(default)]
    pub views: ViewsConfig,

    /// 鉴权 middleware 配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024 // 2 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 路由定义文件配置
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    /// 路由文件目录（*.toml，按文件名字典序加载）
    #[serde(default = "default_routes_dir")]
    pub dir: PathBuf,
}

fn default_routes_dir() -> PathBuf {
    PathBuf::from("routes")
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            dir: default_routes_dir(),
        }
    }
}

/// 视图配置
#[derive(Debug, Clone, Deserialize)]
pub struct ViewsConfig {
    /// 视图目录
    #[serde(default = "default_views_dir")]
    pub dir: PathBuf,

    /// 是否缓存已读取的视图
    #[serde(default)]
    pub cache: bool,
}

fn default_views_dir() -> PathBuf {
    PathBuf::from("views")
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            dir: default_views_dir(),
            cache: false,
        }
    }
}

/// 鉴权配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// 期望的 Bearer token；为空时只要求 Authorization 头存在
    #[serde(default)]
    pub token: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.routes.dir, PathBuf::from("routes"));
        assert_eq!(config.views.dir, PathBuf::from("views"));
        assert!(config.auth.token.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }
}
