use receipt_processor::{router, AppConfig, AppState, ReceiptStore, ServerError};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 加载配置
    let config = AppConfig::load()?;

    // 初始化日志 - 使用本地时间格式
    let level = config.log_level();
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(level.unwrap_or(tracing::Level::INFO))
        .init();
    if level.is_none() {
        warn!("Unknown log level {:?}, using INFO", config.log.level);
    }
    info!("Starting server with config: {:?}", config);

    // 积分存储, 生命周期与进程相同
    let state = AppState::new(Arc::new(ReceiptStore::new()));
    let app = router(state);

    // 启动服务器
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /receipts/process     - submit a receipt");
    info!("  GET  /receipts/:id/points  - points for a processed receipt");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
