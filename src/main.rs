use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use translation_relay::config::Config;
use translation_relay::llm::StructuredLLMFactory;
use translation_relay::pipeline::EventPipeline;
use translation_relay::platform::{ChannelEventSource, DiscordGateway, DiscordPublisher, Publisher};
use translation_relay::routes;
use translation_relay::state::AppState;
use translation_relay::translate::TranslationService;

const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translation_relay=debug,tower_http=debug")),
        )
        .init();

    let (mut config, loaded_path) = Config::discover()?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }
    config.apply_overrides(|name| std::env::var(name).ok());
    config.validate()?;

    let translator_config = &config.translator_config;
    let llm = StructuredLLMFactory::create_llm(
        &translator_config.llm_provider,
        &translator_config.provider_config(),
    )?;
    let translator = TranslationService::new(llm, &translator_config.target_language);

    let (events, source) = ChannelEventSource::new(config.system_config.event_buffer);
    let bot_token = &config.platform_config.bot_token;
    let (gateway, publisher): (Option<DiscordGateway>, Arc<dyn Publisher>) =
        if config.platform_config.gateway_enabled {
            let gateway = DiscordGateway::connect(bot_token, events.clone()).await?;
            let publisher: Arc<dyn Publisher> = Arc::new(DiscordPublisher::new(gateway.http.clone()));
            (Some(gateway), publisher)
        } else {
            info!("Discord gateway disabled, accepting bridge events only");
            let publisher: Arc<dyn Publisher> = Arc::new(DiscordPublisher::from_token(bot_token));
            (None, publisher)
        };

    let mut pipeline = EventPipeline::new(translator, publisher)
        .with_accent_color(config.platform_config.accent_color);
    if let Some(limit) = config.system_config.max_in_flight {
        info!("Limiting in-flight translations to {}", limit);
        pipeline = pipeline.with_max_in_flight(limit);
    }
    let pipeline_task = tokio::spawn(Arc::new(pipeline).run(source));

    let state = AppState::new(
        events,
        translator_config.llm_provider.clone(),
        translator_config.target_language.clone(),
    );
    let app = routes::create_routes(state);

    let addr: SocketAddr = format!("{}:{}", config.system_config.host, config.system_config.port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(gateway) = gateway {
        gateway.shutdown().await;
    }

    // Bridges still connected keep the event channel open
    match tokio::time::timeout(DRAIN_TIMEOUT, pipeline_task).await {
        Ok(joined) => joined?,
        Err(_) => warn!("In-flight messages still running after {:?}, exiting", DRAIN_TIMEOUT),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
