use std::env;
use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use sonara_ai::ProviderConfig;
use sonara_audit::TracingAuditSink;
use sonara_emotion::EmotionEngine;
use sonara_notes::NoteEngine;
use sonara_risk::RiskEngine;

mod error;
mod middleware;
mod routes;
mod state;

use state::AppState;

const DEFAULT_PRIMARY_MODEL: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";
const DEFAULT_SECONDARY_MODEL: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for the platform's log pipeline
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bind = env::var("SONARA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let primary = sonara_ai::create_client(&provider_config(
        "SONARA_PRIMARY_MODEL",
        DEFAULT_PRIMARY_MODEL,
    ))
    .await
    .map_err(|e| eyre::eyre!(e))?;
    let secondary = sonara_ai::create_client(&provider_config(
        "SONARA_SECONDARY_MODEL",
        DEFAULT_SECONDARY_MODEL,
    ))
    .await
    .map_err(|e| eyre::eyre!(e))?;

    let emotion = Arc::new(EmotionEngine::new(primary.clone()));
    let state = AppState {
        emotion: emotion.clone(),
        notes: Arc::new(NoteEngine::new(primary.clone(), secondary)),
        risk: Arc::new(RiskEngine::new(emotion, primary)),
        audit: Arc::new(TracingAuditSink),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/deidentify", post(routes::deidentify::deidentify))
        .route("/emotion", post(routes::emotion::detect_emotion))
        .route("/notes", post(routes::notes::generate_note))
        .route("/risk/assess", post(routes::risk::assess_risk))
        .layer(axum_mw::from_fn(middleware::auth::require_user));

    let app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    tracing::info!(bind, "starting sonara api");
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Provider selection from the environment. `SONARA_PROVIDER` chooses the
/// backend (`bedrock` by default, `ollama` for self-hosted deployments);
/// the model env var falls back to the given default.
fn provider_config(model_env: &str, default_model: &str) -> ProviderConfig {
    let provider = env::var("SONARA_PROVIDER").unwrap_or_else(|_| "bedrock".to_string());
    match provider.as_str() {
        "ollama" => ProviderConfig::Ollama {
            base_url: env::var("SONARA_OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: env::var(model_env).unwrap_or_else(|_| "llama3.1".to_string()),
        },
        _ => ProviderConfig::Bedrock {
            model_id: env::var(model_env).unwrap_or_else(|_| default_model.to_string()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        },
    }
}
