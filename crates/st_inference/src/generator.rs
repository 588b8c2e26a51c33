use std::sync::Arc;

use st_core::{InputText, Result, Summary, SummaryModel};

/// Validates input and runs it through the shared model.
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    model: Arc<dyn SummaryModel>,
}

impl SummaryGenerator {
    pub fn new(model: Arc<dyn SummaryModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<dyn SummaryModel> {
        &self.model
    }

    /// Blank or oversized text is rejected here and never reaches the model.
    pub async fn generate(&self, raw: &str) -> Result<Summary> {
        let input = InputText::new(raw)?;
        self.summarize(&input).await
    }

    pub async fn summarize(&self, input: &InputText) -> Result<Summary> {
        tracing::info!(
            "Summarizing {} characters with {}",
            input.char_count(),
            self.model.name()
        );
        match self.model.summarize(input).await {
            Ok(summary) => {
                tracing::info!("Summary ready ({} characters)", summary.char_count());
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("Error generating summary: {}", e);
                Err(e)
            }
        }
    }
}
