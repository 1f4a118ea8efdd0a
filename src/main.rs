mod agent;
mod errors;
mod latency;
mod models;
mod routes;
mod service;
mod store;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::SimulatedAgentService;
use crate::latency::Latency;
use crate::routes::api_routes::ApiState;
use crate::service::chat_service::ChatService;
use crate::service::upload_service::UploadService;
use crate::store::conversation_repository::ConversationRepository;
use crate::store::message_repository::MessageRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatquery=debug,tower_http=debug".into()),
        )
        .init();

    // ── Simulation knobs ──────────────────────────────────────────────────────
    let latency = match std::env::var("CHATQUERY_SIMULATED_LATENCY").as_deref() {
        Ok("false") | Ok("0") => Latency::none(),
        _ => Latency::realistic(),
    };
    let upload_failure_rate: f64 = std::env::var("CHATQUERY_UPLOAD_FAILURE_RATE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0);

    // ── Store & dependency wiring ─────────────────────────────────────────────
    let store = store::seeded();
    let conversation_repo = ConversationRepository::new(store.clone());
    let message_repo = MessageRepository::new(store);
    let agent = SimulatedAgentService::new();
    let chat_service = ChatService::new(conversation_repo, message_repo, agent, latency);
    let upload_service = UploadService::new(latency, upload_failure_rate);

    info!("In-memory store seeded with demo conversations");

    // ── Router ────────────────────────────────────────────────────────────────
    let state = ApiState { chat: chat_service, uploads: upload_service };
    let app = routes::api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // ── Listen ────────────────────────────────────────────────────────────────
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
