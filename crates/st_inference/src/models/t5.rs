use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use st_core::{Error, InputText, Result, Summary, SummaryModel};

use crate::device::{describe, select_device};
use crate::Config;

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHT_FILES: &[&str] = &["model.safetensors", "pytorch_model.bin"];
const DEFAULT_MARKERS: &[&str] = &["<pad>", "</s>", "<unk>"];

fn load_err(e: impl fmt::Display) -> Error {
    Error::Load(e.to_string())
}

fn gen_err(e: candle_core::Error) -> Error {
    Error::Generation(e.to_string())
}

/// Paths of the artifacts a T5 checkpoint is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    /// A local directory wins over the hub, which lets the server run offline.
    pub fn resolve(model_id: &str, revision: &str) -> Result<Self> {
        let local = Path::new(model_id);
        if local.is_dir() {
            return Self::from_dir(local);
        }

        tracing::info!("Fetching {}@{} from the model hub", model_id, revision);
        let api = Api::new().map_err(load_err)?;
        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));

        let config = repo.get(CONFIG_FILE).map_err(load_err)?;
        let tokenizer = repo.get(TOKENIZER_FILE).map_err(load_err)?;
        let weights = WEIGHT_FILES
            .iter()
            .find_map(|name| repo.get(name).ok())
            .ok_or_else(|| {
                Error::Load(format!(
                    "{} has none of {}",
                    model_id,
                    WEIGHT_FILES.join(", ")
                ))
            })?;

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        let required = |name: &str| {
            let path = dir.join(name);
            if path.is_file() {
                Ok(path)
            } else {
                Err(Error::Load(format!("Missing {} in {}", name, dir.display())))
            }
        };

        let config = required(CONFIG_FILE)?;
        let tokenizer = required(TOKENIZER_FILE)?;
        let weights = WEIGHT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                Error::Load(format!(
                    "No weights ({}) in {}",
                    WEIGHT_FILES.join(", "),
                    dir.display()
                ))
            })?;

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }

    fn is_safetensors(&self) -> bool {
        self.weights.extension().is_some_and(|ext| ext == "safetensors")
    }
}

struct T5Runner {
    model: t5::T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start_token: u32,
    eos_token: u32,
    use_cache: bool,
    max_summary_tokens: usize,
}

impl T5Runner {
    fn new(
        model: t5::T5ForConditionalGeneration,
        tokenizer: Tokenizer,
        t5_config: &t5::Config,
        device: Device,
        max_summary_tokens: usize,
    ) -> Self {
        Self {
            model,
            tokenizer,
            device,
            decoder_start_token: t5_config
                .decoder_start_token_id
                .unwrap_or(t5_config.pad_token_id) as u32,
            eos_token: t5_config.eos_token_id as u32,
            use_cache: t5_config.use_cache,
            max_summary_tokens,
        }
    }

    fn generate(&mut self, text: &str) -> Result<String> {
        let ids = self.generate_ids(text)?;
        self.tokenizer
            .decode(&ids, true)
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Greedy decoding: the highest scoring token is taken at every step, so
    /// identical input always produces identical output. The decoder start
    /// token and EOS are not part of the result.
    fn generate_ids(&mut self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::Tokenize(e.to_string()))?;
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(gen_err)?;

        self.model.clear_kv_cache();
        let encoder_output = self.model.encode(&input_ids).map_err(gen_err)?;

        let mut output = vec![self.decoder_start_token];
        for step in 0..self.max_summary_tokens {
            let decoder_ids = if step == 0 || !self.use_cache {
                Tensor::new(output.as_slice(), &self.device)
            } else {
                Tensor::new(&output[output.len() - 1..], &self.device)
            }
            .and_then(|t| t.unsqueeze(0))
            .map_err(gen_err)?;

            let next = self
                .model
                .decode(&decoder_ids, &encoder_output)
                .and_then(|logits| logits.flatten_all())
                .and_then(|logits| logits.argmax(0))
                .and_then(|id| id.to_scalar::<u32>())
                .map_err(gen_err)?;

            if next == self.eos_token {
                break;
            }
            output.push(next);
        }
        self.model.clear_kv_cache();

        output.remove(0);
        tracing::debug!("Generated {} tokens", output.len());
        Ok(output)
    }
}

/// A pretrained T5 encoder-decoder run with candle.
pub struct T5Model {
    runner: Arc<Mutex<T5Runner>>,
    model_id: String,
    device: String,
    markers: Vec<String>,
}

impl fmt::Debug for T5Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("T5Model")
            .field("model_id", &self.model_id)
            .field("device", &self.device)
            .finish()
    }
}

impl T5Model {
    /// Resolves, reads and places the model on the configured device.
    /// Blocks on downloads and weight loading.
    pub fn load(config: &Config) -> Result<Self> {
        let files = ModelFiles::resolve(&config.model_id, &config.revision)?;
        let device = select_device(config.device)?;

        let raw_config = std::fs::read_to_string(&files.config).map_err(load_err)?;
        let t5_config: t5::Config = serde_json::from_str(&raw_config).map_err(load_err)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer).map_err(load_err)?;
        configure_tokenizer(&mut tokenizer, config.max_input_tokens)?;

        let markers = special_markers(&tokenizer);

        let vb = if files.is_safetensors() {
            // SAFETY: the weights file is not modified while mapped.
            unsafe { VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device) }
        } else {
            VarBuilder::from_pth(&files.weights, DType::F32, &device)
        }
        .map_err(load_err)?;
        let model = t5::T5ForConditionalGeneration::load(vb, &t5_config).map_err(load_err)?;

        let runner = T5Runner::new(
            model,
            tokenizer,
            &t5_config,
            device.clone(),
            config.max_summary_tokens,
        );

        Ok(Self {
            runner: Arc::new(Mutex::new(runner)),
            model_id: config.model_id.clone(),
            device: describe(&device),
            markers,
        })
    }
}

fn configure_tokenizer(tokenizer: &mut Tokenizer, max_input_tokens: usize) -> Result<()> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_input_tokens,
            ..Default::default()
        }))
        .map_err(load_err)?;
    tokenizer.with_padding(Some(PaddingParams::default()));
    Ok(())
}

fn special_markers(tokenizer: &Tokenizer) -> Vec<String> {
    let mut markers: Vec<String> = tokenizer
        .get_added_tokens_decoder()
        .values()
        .filter(|token| token.special)
        .map(|token| token.content.clone())
        .collect();
    for marker in DEFAULT_MARKERS {
        if !markers.iter().any(|m| m == marker) {
            markers.push(marker.to_string());
        }
    }
    markers
}

#[async_trait::async_trait]
impl SummaryModel for T5Model {
    fn name(&self) -> &str {
        "T5"
    }

    fn device(&self) -> String {
        self.device.clone()
    }

    async fn summarize(&self, input: &InputText) -> Result<Summary> {
        let runner = Arc::clone(&self.runner);
        let text = input.as_str().to_string();

        let decoded = tokio::task::spawn_blocking(move || {
            let mut runner = runner
                .lock()
                .map_err(|_| Error::Generation("model lock poisoned".to_string()))?;
            runner.generate(&text)
        })
        .await
        .map_err(|e| Error::Generation(format!("Generation task failed: {}", e)))??;

        let markers: Vec<&str> = self.markers.iter().map(String::as_str).collect();
        Summary::from_decoded(&decoded, &markers)
    }
}
