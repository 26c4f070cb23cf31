use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vision_to_values::adapters::ai::OpenAIProvider;
use vision_to_values::adapters::browser::WebDriverBrowser;
use vision_to_values::adapters::extractor::{RenderedExtractor, StaticExtractor};
use vision_to_values::adapters::http::{app_router, DraftingHandlers, SessionHandlers};
use vision_to_values::adapters::storage::InMemorySessionStore;
use vision_to_values::application::handlers::drafting::{
    DraftFromWebsiteHandler, PolishDocumentHandler, RefineSectionHandler, VisionChatHandler,
};
use vision_to_values::application::handlers::session::{IdleSessionSweeper, SessionLocks};
use vision_to_values::application::services::prompts;
use vision_to_values::config::AppConfig;
use vision_to_values::ports::{AIProvider, HeadlessBrowser, SessionStore, TextExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let ai: Arc<dyn AIProvider> = Arc::new(
        OpenAIProvider::new(config.ai.openai_config()?)
            .context("failed to build OpenAI client")?,
    );

    let extraction = &config.extraction;
    let static_extractor: Arc<dyn TextExtractor> = Arc::new(
        StaticExtractor::new(extraction.static_extractor_config())
            .context("failed to build HTTP client")?,
    );
    let browser: Arc<dyn HeadlessBrowser> = Arc::new(
        WebDriverBrowser::new(extraction.webdriver_config())
            .context("failed to build WebDriver client")?,
    );
    let rendered_extractor: Arc<dyn TextExtractor> = Arc::new(RenderedExtractor::new(
        browser,
        extraction.rendered_extractor_config(),
    ));

    let website_drafter = Arc::new(DraftFromWebsiteHandler::new(
        static_extractor,
        ai.clone(),
        prompts::website_synthesis_prompt(),
        extraction.min_content_chars,
    ));
    let rendered_drafter = Arc::new(
        DraftFromWebsiteHandler::new(
            rendered_extractor,
            ai.clone(),
            prompts::rendered_synthesis_prompt(),
            extraction.min_content_chars,
        )
        .with_url_validation(),
    );
    let refiner = Arc::new(RefineSectionHandler::new(ai.clone()));

    let drafting = DraftingHandlers::new(
        website_drafter,
        rendered_drafter.clone(),
        Arc::new(PolishDocumentHandler::new(ai.clone())),
        refiner.clone(),
        Arc::new(VisionChatHandler::new(ai.clone())),
    );
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let locks = SessionLocks::new();
    let sessions = SessionHandlers::with_locks(store.clone(), locks.clone(), rendered_drafter, refiner);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = IdleSessionSweeper::new(store, locks, config.session.sweep_config());
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    let app = app_router(drafting, sessions, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let provider = ai.provider_info();
    info!(
        %addr,
        model = %provider.model,
        webdriver = %extraction.webdriver_url,
        "vision-to-values listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    shutdown_tx.send(true).ok();
    sweeper_task.await.context("idle session sweeper panicked")?;
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
