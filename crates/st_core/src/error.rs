use thiserror::Error;

use crate::limits::MAX_INPUT_CHARS;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Masukkan teks untuk diringkas!")]
    EmptyInput,

    #[error("Teks terlalu panjang: {chars} karakter, maksimal {max} karakter.")]
    InputTooLong { chars: usize, max: usize },

    #[error("Model load error: {0}")]
    Load(String),

    #[error("Tokenization error: {0}")]
    Tokenize(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Model produced an empty summary")]
    EmptySummary,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn too_long(chars: usize) -> Self {
        Error::InputTooLong {
            chars,
            max: MAX_INPUT_CHARS,
        }
    }

    /// Rejections raised before the model is ever called.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InputTooLong { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
