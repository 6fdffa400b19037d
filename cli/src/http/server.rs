//! HTTP服务器生命周期管理

use super::{
    middleware::{create_middleware_stack, request_logger},
    routes::create_router,
    AppState,
};
use crate::commands::cli::ServeArgs;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use uuid::Uuid;
use vatcheck_core::api::{AppConfig, CliError, Services};

/// 把命令行参数合并进配置（命令行优先）
pub fn apply_serve_args(cfg: &mut AppConfig, args: &ServeArgs) {
    if let Some(host) = &args.host {
        cfg.server.host = host.clone();
    }
    if let Some(port) = args.port {
        cfg.server.port = port;
    }
    if args.background {
        cfg.batch.background = true;
    }
}

/// 处理 serve 命令
pub async fn handle_serve(
    args: ServeArgs,
    mut cfg: AppConfig,
    services: Services,
) -> Result<(), CliError> {
    apply_serve_args(&mut cfg, &args);

    let instance_id = Uuid::new_v4().to_string();
    let host = cfg.server.host.clone();
    let port = cfg.server.port;
    let state = AppState::new(instance_id, cfg, services);

    start_server(host, port, state)
        .await
        .map_err(|e: Box<dyn std::error::Error + Send + Sync>| CliError::Command(e.to_string()))
}

/// 路由 + 中间件，测试与服务器共用
pub fn create_app(state: AppState) -> Router {
    let stack = create_middleware_stack(&state.config.server);
    create_router(state)
        .layer(middleware::from_fn(request_logger))
        .layer(stack)
}

/// 启动HTTP服务器
pub async fn start_server(
    host: String,
    port: u16,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!(
        target: "vatcheck.http",
        instance_id = %state.instance_id,
        registry = state.services.verifier.registry_name(),
        background = state.config.batch.background,
        "Starting HTTP server on {}:{}",
        host,
        port
    );

    let app = create_app(state.clone());

    let listener = bind_listener(&host, port).await?;
    let addr = listener.local_addr()?;
    info!(target: "vatcheck.http", "HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C signal");
                }
                _ = wait_for_sigterm() => {
                    info!("Received SIGTERM signal");
                }
            }

            info!("Starting graceful shutdown...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// 绑定监听地址；host 可以是主机名、IPv4 或不带括号的 IPv6
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

/// 等待 SIGTERM 信号（Unix系统）
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            // 无法注册时只依赖 Ctrl+C
            warn!("Failed to setup SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Windows 系统不支持 SIGTERM
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
