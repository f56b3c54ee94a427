//! TOML Route Source - 路由定义文件
//!
//! ```toml
//! [[route]]
//! method = "get"
//! path = "/"
//! view = "home"
//!
//! [[route]]
//! method = "post"
//! path = "/users"
//! controller = "UserController"
//! action = "create"
//! middleware = "auth"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::application::error::ConfigurationError;
use crate::application::routing::{Handler, HandlerCatalog, RouteRegistry};
use crate::application::RouteSource;
use crate::domain::routing::MethodBucket;

/// 文件整体结构
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteFile {
    #[serde(default, rename = "route")]
    routes: Vec<RouteDefinition>,
}

/// 单条路由定义
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDefinition {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub callable: Option<String>,
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub middleware: Option<String>,
}

impl RouteDefinition {
    /// view / callable / controller+action 三者恰好其一
    fn handler(&self, origin: &str, handlers: &HandlerCatalog) -> Result<Handler, ConfigurationError> {
        match (&self.view, &self.callable, &self.controller, &self.action) {
            (Some(view), None, None, None) => Ok(Handler::view(view.clone())),
            (None, Some(name), None, None) => handlers.resolve_callable(name),
            (None, None, Some(controller), Some(action)) => {
                handlers.resolve_action(controller, action)
            }
            (None, None, Some(_), None) => Err(ConfigurationError::invalid_route(
                origin,
                format!("route `{}` has a controller but no action", self.path),
            )),
            (None, None, None, Some(_)) => Err(ConfigurationError::invalid_route(
                origin,
                format!("route `{}` has an action but no controller", self.path),
            )),
            (None, None, None, None) => Err(ConfigurationError::invalid_route(
                origin,
                format!("route `{}` has no handler", self.path),
            )),
            _ => Err(ConfigurationError::invalid_route(
                origin,
                format!(
                    "route `{}` must define exactly one of view, callable or controller",
                    self.path
                ),
            )),
        }
    }
}

/// 一个路由定义文件
#[derive(Debug)]
pub struct TomlRouteSource {
    /// 文件名，决定加载顺序
    name: String,
    path: PathBuf,
    routes: Vec<RouteDefinition>,
}

impl TomlRouteSource {
    /// 读取并解析路由文件
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut source = Self::parse(name, &content)?;
        source.path = path.to_path_buf();
        Ok(source)
    }

    /// 从字符串解析
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let file: RouteFile = toml::from_str(content).map_err(|e| ConfigurationError::Parse {
            path: name.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: PathBuf::from(&name),
            name,
            routes: file.routes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }
}

impl RouteSource for TomlRouteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(
        &self,
        routes: &mut RouteRegistry,
        handlers: &HandlerCatalog,
    ) -> Result<(), ConfigurationError> {
        let origin = self.path.display().to_string();

        for definition in &self.routes {
            let bucket: MethodBucket = definition.method.parse()?;
            let handler = definition.handler(&origin, handlers)?;

            let route = routes.register(bucket, definition.path.clone(), handler);
            if let Some(middleware) = &definition.middleware {
                route.middleware(middleware)?;
            }
        }

        Ok(())
    }
}
