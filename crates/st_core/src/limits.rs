/// Maximum characters accepted from the text area.
pub const MAX_INPUT_CHARS: usize = 2000;

/// Token budget the input is truncated to before encoding.
pub const MAX_INPUT_TOKENS: usize = 512;

/// Upper bound on generated summary tokens.
pub const MAX_SUMMARY_TOKENS: usize = 200;
