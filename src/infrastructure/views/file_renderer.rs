//! File View Renderer - 文件系统视图渲染
//!
//! 实现 ViewRendererPort trait：`<views_dir>/<name>.html`

use dashmap::DashMap;
use std::path::{Component, Path, PathBuf};

use crate::application::ports::{
    ViewError, ViewRendererPort, NOT_FOUND_VIEW, SERVER_ERROR_VIEW, UNAUTHORIZED_VIEW,
};

/// 视图文件扩展名
const VIEW_EXTENSION: &str = "html";

const BUILTIN_NOT_FOUND: &str =
    "<!DOCTYPE html>\n<html><head><title>404 Not Found</title></head>\n<body><h1>404 Not Found</h1><p>The requested page does not exist.</p></body></html>\n";

const BUILTIN_SERVER_ERROR: &str =
    "<!DOCTYPE html>\n<html><head><title>500 Internal Server Error</title></head>\n<body><h1>500 Internal Server Error</h1><p>Something went wrong.</p></body></html>\n";

const BUILTIN_UNAUTHORIZED: &str =
    "<!DOCTYPE html>\n<html><head><title>401 Unauthorized</title></head>\n<body><h1>401 Unauthorized</h1></body></html>\n";

/// 内置的默认视图，视图目录中没有对应文件时使用
fn builtin_view(name: &str) -> Option<&'static str> {
    match name {
        NOT_FOUND_VIEW => Some(BUILTIN_NOT_FOUND),
        SERVER_ERROR_VIEW => Some(BUILTIN_SERVER_ERROR),
        UNAUTHORIZED_VIEW => Some(BUILTIN_UNAUTHORIZED),
        _ => None,
    }
}

/// 文件系统视图渲染器
pub struct FileViewRenderer {
    /// 视图根目录
    base_dir: PathBuf,
    /// 已读取的视图，None 表示不缓存
    cache: Option<DashMap<String, String>>,
}

impl FileViewRenderer {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            cache: None,
        }
    }

    /// 启用内存缓存
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(DashMap::new());
        self
    }

    /// 视图名 → 文件路径；拒绝绝对路径与 `..`
    fn view_path(&self, name: &str) -> Result<PathBuf, ViewError> {
        let relative = Path::new(name);
        let safe = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(ViewError::InvalidName(name.to_string()));
        }

        Ok(self
            .base_dir
            .join(format!("{}.{}", name, VIEW_EXTENSION)))
    }

    fn read(&self, name: &str) -> Result<String, ViewError> {
        let path = self.view_path(name)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => match builtin_view(name) {
                Some(content) => Ok(content.to_string()),
                None => Err(ViewError::NotFound(name.to_string())),
            },
            Err(e) => Err(ViewError::IoError(format!("{}: {}", path.display(), e))),
        }
    }
}

impl ViewRendererPort for FileViewRenderer {
    fn render(&self, name: &str) -> Result<String, ViewError> {
        if let Some(cache) = &self.cache {
            if let Some(content) = cache.get(name) {
                return Ok(content.clone());
            }
        }

        let content = self.read(name)?;
        tracing::debug!(view = %name, size = content.len(), "View loaded");

        if let Some(cache) = &self.cache {
            cache.insert(name.to_string(), content.clone());
        }

        Ok(content)
    }
}
