use anyhow::{Context, Result, bail};
use motif_application::ConfiguratorUseCase;
use motif_core::config::SaveConfig;
use motif_core::gateway::{ReferenceDataProvider, SubmitGateway};
use motif_core::model::EditSession;
use motif_infrastructure::{
    ConfigService, JsonReferenceProvider, MemorySubmitGateway, OutboxSubmitGateway,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct ReplayOptions {
    pub reference: PathBuf,
    pub actions: PathBuf,
    pub submit: bool,
    pub outbox: Option<PathBuf>,
    pub item_id: String,
    pub config: Option<PathBuf>,
}

fn load_save_config(path: Option<PathBuf>) -> Result<SaveConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => match ConfigService::new() {
            Ok(service) => service,
            Err(e) => {
                tracing::warn!("[Replay] No config directory ({}), using defaults", e);
                return Ok(SaveConfig::default());
            }
        },
    };
    service
        .save_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))
}

/// Replays the script and returns the final session.
pub async fn replay(options: ReplayOptions) -> Result<EditSession> {
    let config = load_save_config(options.config)?;
    let actions = super::read_actions(&options.actions)?;

    let provider: Arc<dyn ReferenceDataProvider> =
        Arc::new(JsonReferenceProvider::from_file(&options.reference));
    let gateway: Arc<dyn SubmitGateway> = match &options.outbox {
        Some(dir) => Arc::new(OutboxSubmitGateway::new(dir, options.item_id.clone())),
        None => Arc::new(MemorySubmitGateway::new()),
    };
    let usecase = ConfiguratorUseCase::new(options.item_id, provider, gateway, config);

    usecase
        .load()
        .await
        .with_context(|| format!("Failed to load {}", options.reference.display()))?;

    for action in actions {
        usecase.dispatch(action).await;
    }

    if options.submit {
        let attempt_id = usecase
            .submit_form()
            .await
            .context("Failed to start save")?;
        tracing::info!("[Replay] Save {} started", attempt_id);

        let finished = tokio::time::timeout(SUBMIT_TIMEOUT, async {
            while usecase.is_saving().await {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await;
        if finished.is_err() {
            bail!("Save {} did not finish within {:?}", attempt_id, SUBMIT_TIMEOUT);
        }
        if let Some(error) = usecase.error_message().await {
            tracing::error!("[Replay] Save {} failed: {}", attempt_id, error);
        }
    }

    Ok(usecase.session().await)
}

pub async fn run(options: ReplayOptions) -> Result<()> {
    let session = replay(options).await?;
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
