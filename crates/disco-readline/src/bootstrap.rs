use std::sync::Arc;

use anyhow::{Context, Result};
use disco_application::{DiscoveryController, SessionRegistry};
use disco_core::secret::SecretService;
use disco_infrastructure::{ConfigService, DiscoPaths, SecretServiceImpl};
use disco_interaction::{GoogleSheetsStore, OpenAIApiGenerator};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Everything the REPL needs, built once at startup.
pub struct AppBootstrap {
    pub controller: DiscoveryController,
    pub registry: SessionRegistry,
    pub workbook: String,
    pub worksheet: String,
}

impl AppBootstrap {
    /// Loads configuration and credentials and wires the external clients.
    ///
    /// Fails before any form is shown when either credential is missing.
    pub async fn init(paths: &DiscoPaths) -> Result<Self> {
        let config = ConfigService::new(paths)?
            .load_validated()
            .context("Invalid config.toml")?;

        let secret_path = paths
            .ensure_secret_file()
            .context("Failed to prepare secret.json")?;
        let credentials = SecretServiceImpl::new(paths)?
            .require_credentials()
            .await
            .with_context(|| format!("Add the missing credentials to {}", secret_path.display()))?;

        let generator =
            OpenAIApiGenerator::from_config(&credentials.openai, &config.root.generation);
        tracing::info!("[Bootstrap] Generation model: {}", generator.model());

        let store = GoogleSheetsStore::new(&credentials.service_account, &config.root.store)
            .context("Failed to initialize Google Sheets client")?;
        tracing::info!(
            "[Bootstrap] Appending to '{}' / '{}'",
            store.workbook(),
            store.worksheet()
        );

        Ok(Self {
            workbook: store.workbook().to_string(),
            worksheet: store.worksheet().to_string(),
            controller: DiscoveryController::new(
                config.questions,
                config.prompt,
                Arc::new(generator),
                Arc::new(store),
            ),
            registry: SessionRegistry::new(),
        })
    }
}

/// Sends logs to `<config dir>/logs/disco.log.YYYY-MM-DD` so they never
/// interleave with the form. `RUST_LOG` overrides the default `info` level.
///
/// The returned guard must be held until exit to flush buffered lines.
pub fn init_tracing(paths: &DiscoPaths) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "disco.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}
