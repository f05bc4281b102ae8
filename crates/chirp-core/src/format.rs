//! Rendered fragments for recognized entities.
//!
//! The engine talks to rendering through the [`Formatter`] trait so callers
//! can swap every fragment without touching recognition. The default
//! implementation produces twitter.com hyperlinks.

/// Produces the markup spliced in for each recognized entity.
///
/// The sigil arguments hand back the glyph that appeared in the text (`@` or
/// `＠`, `#` or `＃`) so renderers can echo it. `format_url` receives the
/// link target (scheme included) and an already escaped, already shortened
/// display text.
pub trait Formatter {
    fn format_url(&self, url: &str, display: &str) -> String;
    fn format_username(&self, at: &str, username: &str) -> String;
    fn format_list(&self, at: &str, username: &str, list: &str) -> String;
    fn format_tag(&self, hash: &str, tag: &str) -> String;
}

/// Fixed-template hyperlinks pointing at twitter.com.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format_url(&self, url: &str, display: &str) -> String {
        format!("<a href=\"{}\">{}</a>", escape(url), display)
    }

    fn format_username(&self, at: &str, username: &str) -> String {
        format!(
            "<a href=\"https://twitter.com/{}\">{}{}</a>",
            username, at, username
        )
    }

    fn format_list(&self, at: &str, username: &str, list: &str) -> String {
        format!(
            "<a href=\"https://twitter.com/{}/{}\">{}{}/{}</a>",
            username, list, at, username, list
        )
    }

    fn format_tag(&self, hash: &str, tag: &str) -> String {
        format!(
            "<a href=\"https://twitter.com/search?q={}\">{}{}</a>",
            quote(&format!("#{}", tag)),
            hash,
            tag
        )
    }
}

/// Escapes the characters that would break out of an HTML attribute or text
/// node: `&`, `"`, `'`, `>`, `<`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Truncates URL display text to `max_len` characters, never cutting through
/// an unterminated character-entity reference. `None` means unlimited.
pub fn shorten_url(text: &str, max_len: Option<usize>) -> String {
    let Some(max_len) = max_len else {
        return text.to_string();
    };
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
    // An `&` with no `;` after it is a severed entity reference; back off.
    if let Some(amp) = cut.rfind('&') {
        let close = cut.rfind(';');
        if close.is_none() || close < Some(amp) {
            cut.truncate(amp);
        }
    }
    cut.push_str("...");
    cut
}

/// Percent-encodes query text the way `urllib.parse.quote` does: unreserved
/// characters and `/` pass through, everything else becomes `%XX` per UTF-8
/// byte.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push(hex_digit(byte >> 4));
                out.push(hex_digit(byte & 0xF));
            }
        }
    }
    out
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('0')
}
