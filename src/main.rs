//! Plan Weaver server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use plan_weaver::adapters::ai::{GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider};
use plan_weaver::adapters::http::{app_router, build_workspace};
use plan_weaver::application::engine::OracleClient;
use plan_weaver::config::{AiConfig, AiProvider, AppConfig};
use plan_weaver::domain::synthesis::DocumentKind;
use plan_weaver::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load and validate config
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    // 2. Tracing
    init_tracing(&config);

    // 3. Oracle and workspaces
    let provider = build_provider(&config.ai)?;
    let oracle = OracleClient::new(provider, config.ai.timeout())
        .with_temperature(config.ai.temperature)
        .with_max_tokens(config.ai.max_output_tokens);
    let info = oracle.provider_info();
    info!(provider = %info.name, model = %info.model, "oracle configured");

    let workspaces = DocumentKind::ALL
        .into_iter()
        .map(|kind| build_workspace(kind, oracle.clone(), &config.engine))
        .collect();
    let app = app_router(workspaces, &config.server);

    // 4. Serve
    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, environment = ?config.server.environment, "plan-weaver listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("plan-weaver stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

fn build_provider(ai: &AiConfig) -> Result<Arc<dyn AIProvider>> {
    let provider: Arc<dyn AIProvider> = match ai.provider {
        AiProvider::Gemini => {
            let key = ai
                .gemini_api_key
                .as_ref()
                .context("gemini api key is not set")?;
            let mut cfg = GeminiConfig::new(key.expose_secret().as_str())
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = &ai.model {
                cfg = cfg.with_model(model.as_str());
            }
            if let Some(url) = &ai.base_url {
                cfg = cfg.with_base_url(url.as_str());
            }
            Arc::new(GeminiProvider::new(cfg)?)
        }
        AiProvider::OpenAI => {
            let key = ai
                .openai_api_key
                .as_ref()
                .context("openai api key is not set")?;
            let mut cfg = OpenAIConfig::new(key.expose_secret().as_str())
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = &ai.model {
                cfg = cfg.with_model(model.as_str());
            }
            if let Some(url) = &ai.base_url {
                cfg = cfg.with_base_url(url.as_str());
            }
            Arc::new(OpenAIProvider::new(cfg)?)
        }
    };
    Ok(provider)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
