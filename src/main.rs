//! Process bootstrap: configuration, logging, adapters, and the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use omni_concierge::adapters::ai::{GrokConfig, GrokProvider};
use omni_concierge::adapters::email::ResendNotifier;
use omni_concierge::adapters::http::{build_router, ChatHandlers};
use omni_concierge::adapters::store::InMemorySessionStore;
use omni_concierge::application::{BookAppointmentHandler, ConversationController};
use omni_concierge::config::{AppConfig, ValidationError};
use omni_concierge::ports::{AppointmentNotifier, SessionStore};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = config.ai.api_key().ok_or(ValidationError::MissingRequired(
        "OMNI_CONCIERGE__AI__XAI_API_KEY",
    ))?;
    let provider = Arc::new(GrokProvider::new(
        GrokConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    ));

    let store: Arc<InMemorySessionStore> = Arc::new(InMemorySessionStore::new());

    let notifier: Option<Arc<dyn AppointmentNotifier>> = match &config.email.resend_api_key {
        Some(key) if config.email.is_configured() => Some(Arc::new(ResendNotifier::new(
            key.clone(),
            config.email.from_header(),
            config.email.notify_inbox.clone(),
        ))),
        _ => {
            tracing::warn!("email not configured; appointment notifications disabled");
            None
        }
    };

    let conversation = Arc::new(ConversationController::new(
        store.clone() as Arc<dyn SessionStore>,
        provider,
    ));
    let booking = Arc::new(BookAppointmentHandler::new(
        store.clone() as Arc<dyn SessionStore>,
        notifier,
    ));
    let app = build_router(
        ChatHandlers::new(conversation, booking),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    spawn_idle_session_sweeper(store.clone(), config.server.session_ttl_secs);

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        model = %config.ai.model,
        environment = ?config.server.environment,
        "starting omni-concierge"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically evicts sessions idle past the configured TTL.
fn spawn_idle_session_sweeper(store: Arc<InMemorySessionStore>, ttl_secs: u64) {
    let max_idle = chrono::Duration::seconds(ttl_secs as i64);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let evicted = store.evict_idle(max_idle).await;
            if evicted > 0 {
                tracing::info!(evicted, "evicted idle sessions");
            }
        }
    });
}
