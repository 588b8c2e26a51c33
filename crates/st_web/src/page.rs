//! Server-rendered single page: input form, outcome block and footer.

use st_core::limits::MAX_INPUT_CHARS;
use st_core::text::normalize_newlines;
use st_core::{Error, Result, Summary};

pub const EMPTY_SUMMARY_MESSAGE: &str = "Gagal membuat ringkasan.";

/// What a submission produced. Exactly one of these is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Summary(Summary),
    Warning(String),
    Failure(String),
}

impl From<Result<Summary>> for Outcome {
    fn from(result: Result<Summary>) -> Self {
        match result {
            Ok(summary) => Outcome::Summary(summary),
            Err(e) if e.is_input_error() => Outcome::Warning(e.to_string()),
            Err(Error::EmptySummary) => Outcome::Failure(EMPTY_SUMMARY_MESSAGE.to_string()),
            Err(e) => Outcome::Failure(format!("Error generating summary: {}", e)),
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"<style>
  body { font-family: "Source Sans Pro", sans-serif; max-width: 730px; margin: 0 auto; padding: 2rem 1rem; color: #31333F; }
  h1 { text-align: center; color: #00C2C2; margin-bottom: 0; }
  h3 { text-align: center; margin-top: 0.25rem; }
  .centered { text-align: center; }
  textarea { width: 100%; height: 200px; box-sizing: border-box; padding: 10px; border-radius: 8px; border: 1px solid #ccc; font-size: 14px; resize: vertical; }
  .counter { font-size: 16px; color: #00C2C2; }
  .triangle { display: inline-block; width: 0; height: 0; border-left: 5px solid transparent; border-right: 5px solid transparent; border-bottom: 10px solid #00C2C2; margin-left: 5px; margin-right: 5px; }
  button { background-color: #00C2C2; color: white; border: none; padding: 10px 20px; border-radius: 8px; cursor: pointer; }
  button:disabled { opacity: 0.6; cursor: wait; }
  #spinner { display: none; margin-left: 10px; }
  .summary-box { padding: 10px; border: 2px solid #00C2C2; border-radius: 10px; background-color: #F0F8FF; height: 200px; overflow-y: auto; }
  .summary-box p { margin: 0; font-size: 14px; color: black; white-space: pre-wrap; }
  .actions { display: grid; grid-template-columns: 1fr 2fr 1fr; gap: 8px; }
  .actions button { width: 100%; }
  .warning { background: #FFFCE7; color: #926C05; padding: 12px; border-radius: 8px; }
  .error { background: #FFECEC; color: #7D353B; padding: 12px; border-radius: 8px; }
  footer { text-align: center; font-size: 12px; }
</style>"#;

const SCRIPT: &str = r#"<script>
  const input = document.getElementById("input-text");
  const count = document.getElementById("input-count");
  input.addEventListener("input", function () { count.textContent = Array.from(input.value.replace(/\r\n/g, "\n")).length; });
  document.getElementById("summarize-form").addEventListener("submit", function () {
    document.getElementById("summarize-button").disabled = true;
    document.getElementById("spinner").style.display = "inline";
  });
  function copyToClipboard() {
    const text = document.getElementById("summary-text").innerText;
    navigator.clipboard.writeText(text).then(function () {
      alert("Ringkasan berhasil disalin!");
    }, function (err) {
      console.error("Tidak dapat menyalin teks: ", err);
    });
  }
</script>"#;

fn counter(id: Option<&str>, chars: usize) -> String {
    let span = match id {
        Some(id) => format!("<span id=\"{}\">{}</span>", id, chars),
        None => chars.to_string(),
    };
    format!(
        "<p class=\"counter\">ID <span class=\"triangle\"></span>({}/{}) Karakter</p>",
        span, MAX_INPUT_CHARS
    )
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Summary(summary) => {
            let escaped = escape_html(summary.as_str());
            format!(
                concat!(
                    "<section id=\"result\"><br><p><strong>Hasil Ringkasan</strong></p>",
                    "<div class=\"summary-box\"><p id=\"summary-text\">{summary}</p></div>",
                    "{counter}",
                    "<div class=\"actions\">",
                    "<button type=\"button\" onclick=\"copyToClipboard()\">Copy to Clipboard</button>",
                    "<span></span>",
                    "<form method=\"post\" action=\"/download\">",
                    "<input type=\"hidden\" name=\"summary\" value=\"{summary}\">",
                    "<button type=\"submit\">Download</button>",
                    "</form></div></section>"
                ),
                summary = escaped,
                counter = counter(None, summary.char_count()),
            )
        }
        Outcome::Warning(message) => {
            format!("<div class=\"warning\" role=\"alert\">{}</div>", escape_html(message))
        }
        Outcome::Failure(message) => {
            format!("<div class=\"error\" role=\"alert\">{}</div>", escape_html(message))
        }
    }
}

/// Renders the whole page. `input` is echoed back into the text area.
pub fn render(input: &str, outcome: Option<&Outcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"id\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>SumText - Online Summarize</title>");
    html.push_str(STYLE);
    html.push_str("</head><body>");

    html.push_str("<h1>SumText</h1><h3>ONLINE SUMMARIZE</h3>");
    html.push_str(
        "<p class=\"centered\">Dapatkan ringkasan teks yang jelas dan informatif dengan SumText<br>\
         AI peringkas yang membantu anda menyederhanakan informasi secara cepat dan akurat.</p><hr>",
    );

    html.push_str("<form id=\"summarize-form\" method=\"post\" action=\"/\">");
    html.push_str("<p><strong>Masukkan teks Anda di sini...</strong></p>");
    html.push_str(&format!(
        "<textarea id=\"input-text\" name=\"text\" maxlength=\"{}\" placeholder=\"Tulis teks di sini...\">{}</textarea>",
        MAX_INPUT_CHARS,
        escape_html(input)
    ));
    html.push_str(&counter(
        Some("input-count"),
        normalize_newlines(input).chars().count(),
    ));
    html.push_str(
        "<button id=\"summarize-button\" type=\"submit\">Summarize</button>\
         <span id=\"spinner\">Sedang memproses...</span></form>",
    );

    if let Some(outcome) = outcome {
        html.push_str(&render_outcome(outcome));
    }

    html.push_str(
        "<hr><footer>© 2024 SumText. All rights reserved. | Privacy Policy | Terms of Service</footer>",
    );
    html.push_str(SCRIPT);
    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn test_empty_page_has_form_and_no_result() {
        let html = render("", None);
        assert!(html.contains("maxlength=\"2000\""));
        assert!(html.contains("(<span id=\"input-count\">0</span>/2000) Karakter"));
        assert!(!html.contains("Hasil Ringkasan"));
    }

    #[test]
    fn test_summary_block_escapes_and_counts() {
        let summary = Summary::from_decoded("a < b", &[]).unwrap();
        let html = render("a < b dan lainnya", Some(&Outcome::Summary(summary)));
        assert!(html.contains("Hasil Ringkasan"));
        assert!(html.contains("<p id=\"summary-text\">a &lt; b</p>"));
        assert!(html.contains("value=\"a &lt; b\""));
        assert!(html.contains("(5/2000) Karakter"));
        assert!(html.contains(">a &lt; b dan lainnya</textarea>"));
    }

    #[test]
    fn test_counter_matches_server_character_count() {
        let html = render("baris\r\nkedua 😀", None);
        assert!(html.contains("(<span id=\"input-count\">13</span>/2000) Karakter"));
        assert!(html.contains("Array.from("));
    }

    #[test]
    fn test_outcome_from_errors() {
        assert_eq!(
            Outcome::from(Err::<Summary, _>(Error::EmptyInput)),
            Outcome::Warning("Masukkan teks untuk diringkas!".to_string())
        );
        assert_eq!(
            Outcome::from(Err::<Summary, _>(Error::EmptySummary)),
            Outcome::Failure(EMPTY_SUMMARY_MESSAGE.to_string())
        );
        match Outcome::from(Err::<Summary, _>(Error::Decode("bad ids".to_string()))) {
            Outcome::Failure(message) => {
                assert!(message.starts_with("Error generating summary"));
                assert!(message.contains("bad ids"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
