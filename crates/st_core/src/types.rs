use serde::{Deserialize, Serialize};

use crate::limits::MAX_INPUT_CHARS;
use crate::text;
use crate::{Error, Result};

/// Text submitted for summarization.
///
/// Construction is the only validation point: an `InputText` is never
/// blank and never longer than [`MAX_INPUT_CHARS`] characters. Line breaks
/// are normalized to `\n` before counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputText(String);

impl InputText {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = text::normalize_newlines(&raw.into());
        if raw.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        let chars = raw.chars().count();
        if chars > MAX_INPUT_CHARS {
            return Err(Error::too_long(chars));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl TryFrom<String> for InputText {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for InputText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A generated summary, already cleaned of special markers and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(String);

impl Summary {
    /// Builds a summary from raw decoder output.
    ///
    /// `markers` are the model's special tokens; any that survive decoding
    /// are removed before trimming. Blank output is an error.
    pub fn from_decoded(raw: &str, markers: &[&str]) -> Result<Self> {
        let cleaned = text::strip_markers(raw, markers);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Err(Error::EmptySummary);
        }
        Ok(Self(cleaned.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text_rejects_blank() {
        assert!(matches!(InputText::new(""), Err(Error::EmptyInput)));
        assert!(matches!(InputText::new("  \n\t "), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_input_text_counts_characters_not_bytes() {
        let at_limit = "é".repeat(MAX_INPUT_CHARS);
        let input = InputText::new(at_limit).unwrap();
        assert_eq!(input.char_count(), MAX_INPUT_CHARS);

        let over = "é".repeat(MAX_INPUT_CHARS + 1);
        match InputText::new(over) {
            Err(Error::InputTooLong { chars, max }) => {
                assert_eq!(chars, MAX_INPUT_CHARS + 1);
                assert_eq!(max, MAX_INPUT_CHARS);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_input_text_counts_crlf_as_one_character() {
        let lines: Vec<String> = (0..20).map(|_| "a".repeat(99)).collect();
        let raw = format!("{}b", lines.join("\r\n"));
        let input = InputText::new(raw).unwrap();
        assert_eq!(input.char_count(), MAX_INPUT_CHARS);
        assert!(!input.as_str().contains('\r'));
    }

    #[test]
    fn test_input_text_keeps_original_text() {
        let input = InputText::new("  Ini adalah contoh teks panjang yang perlu diringkas.  ").unwrap();
        assert_eq!(input.as_str(), "  Ini adalah contoh teks panjang yang perlu diringkas.  ");
    }

    #[test]
    fn test_input_text_deserialize_validates() {
        let ok: InputText = serde_json::from_str("\"halo dunia\"").unwrap();
        assert_eq!(ok.as_str(), "halo dunia");
        assert!(serde_json::from_str::<InputText>("\"   \"").is_err());
    }

    #[test]
    fn test_summary_is_trimmed_and_cleaned() {
        let summary = Summary::from_decoded("<pad>  Ringkasan singkat. </s>\n", &["<pad>", "</s>"]).unwrap();
        assert_eq!(summary.as_str(), "Ringkasan singkat.");
        assert_eq!(summary.char_count(), 18);
    }

    #[test]
    fn test_summary_rejects_marker_only_output() {
        let result = Summary::from_decoded("<pad></s>  ", &["<pad>", "</s>"]);
        assert!(matches!(result, Err(Error::EmptySummary)));
    }
}
