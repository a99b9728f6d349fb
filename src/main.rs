use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glanceables::classroom::{
    CLASSROOM_SCOPES, ClassroomClient, ClassroomConfig, ClassroomHttpClient, NoopClassroomClient,
};
use glanceables::clock::SystemClock;
use glanceables::routes::router;
use glanceables::services::ClassroomService;
use glanceables::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "glanceables=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client: Arc<dyn ClassroomClient> = match ClassroomConfig::new_from_env() {
        Ok(config) => {
            info!("Using Classroom API at {}", config.base_url);
            info!("Access token must grant: {}", CLASSROOM_SCOPES.join(" "));
            Arc::new(ClassroomHttpClient::new(config)?)
        }
        Err(e) => {
            warn!("{}; serving empty results", e);
            Arc::new(NoopClassroomClient)
        }
    };

    let classroom = Arc::new(ClassroomService::new(client, Arc::new(SystemClock)));
    let app = router(AppState { classroom });

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
