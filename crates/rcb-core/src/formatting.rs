//! Formatting utilities (Markdown subset → Telegram HTML).

use std::sync::OnceLock;

use regex::Regex;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert the Markdown subset used by the bot's replies to Telegram HTML.
///
/// Supported: `` `code` ``, `**bold**`, `*bold*` (Telegram legacy Markdown
/// meaning) and `_italic_`. Emphasis never spans lines. Everything else is
/// escaped and passed through.
pub fn convert_markdown_to_html(input: &str) -> String {
    let (text, inline_codes) = extract_inline_codes(input);
    let mut text = escape_html(&text);

    text = double_star_re()
        .replace_all(&text, "<b>$1</b>")
        .into_owned();
    text = single_star_re()
        .replace_all(&text, "<b>$1</b>")
        .into_owned();
    // A match consumes the separator after it, so `_a_ _b_` needs another pass.
    loop {
        let next = italic_re()
            .replace_all(&text, "${pre}<i>${body}</i>${post}")
            .into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    for (i, code) in inline_codes.iter().enumerate() {
        text = text.replace(
            &format!("\0INLINECODE{i}\0"),
            &format!("<code>{}</code>", escape_html(code)),
        );
    }

    text
}

fn double_star_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid regex"))
}

fn single_star_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*([^*\n]+)\*").expect("valid regex"))
}

// `_` inside identifiers (snake_case) is not emphasis.
fn italic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<pre>^|[^\w])_(?P<body>[^_\n]+)_(?P<post>$|[^\w])").expect("valid regex")
    })
}

fn extract_inline_codes(input: &str) -> (String, Vec<String>) {
    let mut codes = Vec::new();
    let mut out = String::new();

    let mut i = 0usize;
    while let Some(rel) = input[i..].find('`') {
        let start = i + rel;
        out.push_str(&input[i..start]);

        let content_start = start + 1;
        if let Some(end_rel) = input[content_start..].find('`') {
            let end = content_start + end_rel;
            let idx = codes.len();
            codes.push(input[content_start..end].to_string());
            out.push_str(&format!("\0INLINECODE{idx}\0"));
            i = end + 1;
            continue;
        }

        // Unclosed: keep the rest as text.
        out.push_str(&input[start..]);
        return (out, codes);
    }

    out.push_str(&input[i..]);
    (out, codes)
}
