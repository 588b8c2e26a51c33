use async_trait::async_trait;

use crate::types::{InputText, Summary};
use crate::Result;

#[async_trait]
pub trait SummaryModel: Send + Sync + std::fmt::Debug {
    /// Short backend name, used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Device the model runs on, e.g. `cpu` or `cuda:0`.
    fn device(&self) -> String;

    /// Summarize validated input text.
    async fn summarize(&self, input: &InputText) -> Result<Summary>;
}
