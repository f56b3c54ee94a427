//! Waypost - 路由引擎服务
//!
//! 启动流程：配置 → 日志 → 路由加载（失败即退出）→ HTTP 服务

use std::process::ExitCode;
use std::sync::Arc;

use waypost::app::{builtin_routes, handler_catalog};
use waypost::application::{Bootstrap, ViewRendererPort};
use waypost::config::{load_config, print_config, AppConfig};
use waypost::infrastructure::http::{AppState, HttpServer};
use waypost::infrastructure::{default_middlewares, discover_route_files, FileViewRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Waypost - 路由引擎 v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 加载路由；路由定义有误时不对外服务
    let route_files = match discover_route_files(&config.routes.dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::error!(error = %e, "Failed to discover route files");
            return Ok(ExitCode::FAILURE);
        }
    };

    let engine = match Bootstrap::new(
        handler_catalog(),
        default_middlewares(config.auth.token.as_deref()),
    )
    .source(builtin_routes())
    .sources(route_files)
    .build()
    {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Invalid route configuration");
            return Ok(ExitCode::FAILURE);
        }
    };

    for key in engine.table().keys() {
        tracing::debug!(route = %key, "Route available");
    }

    // 视图渲染
    let mut renderer = FileViewRenderer::new(&config.views.dir);
    if config.views.cache {
        renderer = renderer.with_cache();
    }
    let views: Arc<dyn ViewRendererPort> = Arc::new(renderer);

    let server = HttpServer::new(config.server.clone(), AppState::new(&engine, views));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(ExitCode::SUCCESS)
}

/// 初始化日志；`RUST_LOG` 优先于配置
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},waypost={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
