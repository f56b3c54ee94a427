//! Views - 视图渲染实现

mod file_renderer;

pub use file_renderer::FileViewRenderer;
