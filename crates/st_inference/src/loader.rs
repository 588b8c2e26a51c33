use std::sync::Arc;

use tokio::sync::OnceCell;

use st_core::{Result, SummaryModel};

use crate::models::create_model;
use crate::Config;

/// Loads the configured model on first use and hands out the same instance
/// for the rest of the process.
#[derive(Debug)]
pub struct ModelLoader {
    config: Config,
    model: OnceCell<Arc<dyn SummaryModel>>,
}

impl ModelLoader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            model: OnceCell::new(),
        }
    }

    /// A loader that is already holding `model`.
    pub fn preloaded(config: Config, model: Arc<dyn SummaryModel>) -> Self {
        Self {
            config,
            model: OnceCell::new_with(Some(model)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Failed loads are not cached; the next call tries again.
    pub async fn get_or_load(&self) -> Result<Arc<dyn SummaryModel>> {
        self.model
            .get_or_try_init(|| async {
                tracing::info!(
                    "🧠 Loading {} model ({}@{})",
                    self.config.model_name,
                    self.config.model_id,
                    self.config.revision
                );
                create_model(&self.config).await
            })
            .await
            .cloned()
    }

    pub fn get(&self) -> Option<Arc<dyn SummaryModel>> {
        self.model.get().cloned()
    }
}
