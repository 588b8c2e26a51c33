use st_core::limits::{MAX_INPUT_TOKENS, MAX_SUMMARY_TOKENS};

pub mod device;
pub mod generator;
pub mod loader;
pub mod models;

pub use device::DevicePreference;
pub use generator::SummaryGenerator;
pub use loader::ModelLoader;

pub const DEFAULT_MODEL_ID: &str = "migz117/T5-Abstractive";
pub const DEFAULT_REVISION: &str = "main";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend name understood by [`create_model`].
    pub model_name: String,
    /// Hub identifier or path to a local model directory.
    pub model_id: String,
    pub revision: String,
    pub device: DevicePreference,
    pub max_input_tokens: usize,
    pub max_summary_tokens: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: "t5".to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            device: DevicePreference::Auto,
            max_input_tokens: MAX_INPUT_TOKENS,
            max_summary_tokens: MAX_SUMMARY_TOKENS,
        }
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::{Config, DevicePreference, ModelLoader, SummaryGenerator};
    pub use st_core::{Error, InputText, Result, Summary, SummaryModel};
}

pub use models::create_model;
