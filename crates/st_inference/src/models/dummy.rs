use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use st_core::text::leading_words;
use st_core::{Error, InputText, Result, Summary, SummaryModel};

const DEFAULT_WORD_LIMIT: usize = 20;

/// Deterministic stand-in that "summarizes" by keeping the leading words.
///
/// Needs no weights, so it backs local development and the test suites.
/// A failing instance exercises the error path end to end.
pub struct DummyModel {
    word_limit: usize,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel")
            .field("word_limit", &self.word_limit)
            .field("failing", &self.fail_with.is_some())
            .finish()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self {
            word_limit: DEFAULT_WORD_LIMIT,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit;
        self
    }

    /// Every call fails with a generation error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new()
        }
    }

    /// Number of times `summarize` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SummaryModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn device(&self) -> String {
        "cpu".to_string()
    }

    async fn summarize(&self, input: &InputText) -> Result<Summary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(Error::Generation(message.clone()));
        }
        Summary::from_decoded(&leading_words(input.as_str(), self.word_limit), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new().with_word_limit(4);
        let input = InputText::new("  Ini adalah contoh teks panjang yang perlu diringkas.").unwrap();

        let summary = model.summarize(&input).await.unwrap();
        assert_eq!(summary.as_str(), "Ini adalah contoh teks");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_dummy_model() {
        let model = DummyModel::failing("tokenizer exploded");
        let input = InputText::new("teks").unwrap();

        let err = model.summarize(&input).await.unwrap_err();
        assert_eq!(err.to_string(), "Generation error: tokenizer exploded");
        assert_eq!(model.calls(), 1);
    }
}
