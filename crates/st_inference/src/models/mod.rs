use std::sync::Arc;

use st_core::{Error, Result, SummaryModel};

use crate::Config;

pub mod dummy;
pub mod t5;

pub use dummy::DummyModel;
pub use t5::T5Model;

/// Backend names accepted by [`create_model`].
pub const AVAILABLE_MODELS: &[&str] = &["t5", "dummy"];

pub async fn create_model(config: &Config) -> Result<Arc<dyn SummaryModel>> {
    let model: Arc<dyn SummaryModel> = match config.model_name.to_lowercase().as_str() {
        "t5" => {
            let config = config.clone();
            let model = tokio::task::spawn_blocking(move || T5Model::load(&config))
                .await
                .map_err(|e| Error::Load(format!("Model loading task failed: {}", e)))??;
            Arc::new(model)
        }
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Load(format!(
                "Unknown model '{}'. Available models: {}",
                other,
                AVAILABLE_MODELS.join(", ")
            )))
        }
    };
    tracing::info!("Loaded {} model on {}", model.name(), model.device());
    Ok(model)
}
