use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use st_inference::{Config, DevicePreference, ModelLoader, SummaryGenerator};
use st_web::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "SumText: abstractive text summarization", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        env = "SUMTEXT_MODEL",
        default_value = "t5",
        global = true,
        help = "Model backend to use. Available models: t5 (default), dummy"
    )]
    model: String,
    /// Hub identifier or local directory holding config.json, tokenizer.json and weights
    #[arg(long, env = "SUMTEXT_MODEL_ID", default_value = st_inference::DEFAULT_MODEL_ID, global = true)]
    model_id: String,
    #[arg(long, env = "SUMTEXT_REVISION", default_value = st_inference::DEFAULT_REVISION, global = true)]
    revision: String,
    /// Run on the CPU even if an accelerator is available
    #[arg(long, env = "SUMTEXT_CPU", global = true)]
    cpu: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the web UI
    Serve {
        #[arg(long, env = "SUMTEXT_ADDR", default_value = "127.0.0.1:8501")]
        addr: String,
    },
    /// Summarize text once and print the result
    Summarize {
        /// Text to summarize. Read from --file or stdin when omitted.
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
}

impl Cli {
    fn inference_config(&self) -> Config {
        Config {
            model_name: self.model.clone(),
            model_id: self.model_id.clone(),
            revision: self.revision.clone(),
            device: DevicePreference::from_force_cpu(self.cpu),
            ..Config::default()
        }
    }
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    // Load failures end the process here, before anything is served.
    let loader = ModelLoader::new(cli.inference_config());
    let model = loader.get_or_load().await?;
    info!("🧠 Inference model initialized successfully (using {} on {})", model.name(), model.device());
    let generator = SummaryGenerator::new(model);

    match cli.command {
        Commands::Serve { addr } => {
            st_web::serve(AppState { generator }, &addr).await?;
        }
        Commands::Summarize { text, file } => {
            let input = read_input(text, file)?;
            let summary = generator.generate(&input).await?;
            println!("{}", summary);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["sumtext", "serve"]).unwrap();
        let config = cli.inference_config();
        assert_eq!(config.model_id, st_inference::DEFAULT_MODEL_ID);
        assert_eq!(config.max_summary_tokens, 200);
        assert!(matches!(cli.command, Commands::Serve { .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sumtext",
            "summarize",
            "halo dunia",
            "--model",
            "dummy",
            "--cpu",
        ])
        .unwrap();
        let config = cli.inference_config();
        assert_eq!(config.model_name, "dummy");
        assert_eq!(config.device, DevicePreference::Cpu);
        match cli.command {
            Commands::Summarize { text, file } => {
                assert_eq!(text.as_deref(), Some("halo dunia"));
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from(["sumtext", "summarize", "teks", "--file", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "isi berkas").unwrap();

        assert_eq!(read_input(None, Some(path)).unwrap(), "isi berkas");
        assert_eq!(read_input(Some("langsung".to_string()), None).unwrap(), "langsung");
        assert!(read_input(None, Some(dir.path().join("missing.txt"))).is_err());
    }
}
