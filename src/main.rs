//! Assistant relay server.
//!
//! Loads configuration, wires the OpenAI-backed adapters into the turn
//! handler, and serves the HTTP API plus static assets.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assistant_relay::adapters::assistants::{OpenAIAssistantService, OpenAIConfig};
use assistant_relay::adapters::http::{app_router, AssistantAppState};
use assistant_relay::adapters::rate_limiter::InMemoryRateLimiter;
use assistant_relay::application::{PollPolicy, RunTurnHandler};
use assistant_relay::config::AppConfig;
use assistant_relay::ports::{AssistantService, RateLimiter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A relay without credentials must refuse to start
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    init_tracing(&config);

    let (Some(api_key), Some(assistant_id)) = (
        config.assistant.api_key.clone(),
        config.assistant.assistant_id.clone(),
    ) else {
        eprintln!("Missing assistant credentials");
        std::process::exit(1);
    };

    // Remote assistant client
    let openai_config = OpenAIConfig::new(api_key)
        .with_base_url(config.assistant.base_url.clone())
        .with_timeout(config.assistant.timeout());
    let service: Arc<dyn AssistantService> = Arc::new(OpenAIAssistantService::new(openai_config));

    // Turn orchestration
    let policy = PollPolicy::new(
        config.assistant.poll_max_attempts,
        config.assistant.poll_budget(),
        config.assistant.poll_interval(),
    );
    let turn_handler = Arc::new(RunTurnHandler::new(service, assistant_id, policy));
    let state = AssistantAppState::new(turn_handler);

    let limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));

    let app = app_router(state, limiter, &config.server);

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "assistant relay listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for a shutdown signal (ctrl-c).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install shutdown signal handler");
            // Keep serving; shutdown then requires an external kill
            std::future::pending::<()>().await;
        }
    }
}
