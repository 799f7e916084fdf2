// ==========================================
// IWS BDE Plattform - server entry point
// ==========================================

use std::sync::Arc;

use iws_bde::app::{build_router, AppState};
use iws_bde::config::AppConfig;

#[tokio::main]
async fn main() {
    iws_bde::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", iws_bde::APP_NAME);
    tracing::info!("version: {}", iws_bde::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    tracing::info!("database: {}", config.db_path);

    let app_state = AppState::new(config.db_path.clone()).expect("cannot initialize AppState");
    let app = build_router(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("cannot bind listen address");
    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("server failed");
}
