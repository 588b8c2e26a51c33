//! Helpers for cleaning model output and measuring text.

/// Removes every occurrence of the given markers and collapses the runs of
/// whitespace left behind.
pub fn strip_markers(raw: &str, markers: &[&str]) -> String {
    let mut out = raw.to_string();
    for marker in markers.iter().filter(|m| !m.is_empty()) {
        out = out.replace(marker, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts `\r\n` and lone `\r` to `\n`.
///
/// Browsers submit textarea line breaks as `\r\n` but count them as one
/// character against `maxlength`.
pub fn normalize_newlines(raw: &str) -> String {
    if !raw.contains('\r') {
        return raw.to_string();
    }
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// First `limit` whitespace-separated words of `text`.
pub fn leading_words(text: &str, limit: usize) -> String {
    text.split_whitespace().take(limit).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("<pad> a  b</s>", &["<pad>", "</s>"]), "a b");
        assert_eq!(strip_markers("tanpa penanda", &["<unk>", ""]), "tanpa penanda");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_newlines("tanpa baris baru"), "tanpa baris baru");
    }

    #[test]
    fn test_leading_words() {
        assert_eq!(leading_words("satu dua  tiga empat", 3), "satu dua tiga");
        assert_eq!(leading_words("   ", 3), "");
    }
}
