use regex::{Captures, Regex};

use crate::classify;
use crate::entity::{ListEntity, MentionEntity, ParseResult, TagEntity, UrlEntity};
use crate::format::{self, DefaultFormatter, Formatter};
use crate::patterns;
use crate::span::Span;

/// Whether a parse produces rendered output or only entity sequences.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Recognition plus substitution: `ParseResult::html` holds the
    /// rewritten text.
    Html,
    /// Recognition only; the input text is never rewritten, so recorded
    /// spans always refer to the original input.
    Entities,
}

/// The entity recognition and substitution engine.
///
/// Configuration is fixed at construction. A parser holds no per-parse
/// state, so one instance can serve any number of `parse` calls.
pub struct Parser<F = DefaultFormatter> {
    max_url_length: Option<usize>,
    include_spans: bool,
    formatter: F,
}

impl Parser<DefaultFormatter> {
    pub fn new() -> Self {
        Self::with_config(Some(30), false)
    }

    /// `max_url_length` bounds the display text of rendered URLs in
    /// characters (`None` = unlimited). `include_spans` attaches character
    /// offset spans to every recorded entity.
    pub fn with_config(max_url_length: Option<usize>, include_spans: bool) -> Self {
        Self {
            max_url_length,
            include_spans,
            formatter: DefaultFormatter,
        }
    }
}

impl Default for Parser<DefaultFormatter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Formatter> Parser<F> {
    pub fn with_formatter(
        formatter: F,
        max_url_length: Option<usize>,
        include_spans: bool,
    ) -> Self {
        Self {
            max_url_length,
            include_spans,
            formatter,
        }
    }

    /// Parses `text`, running the reply resolver once and then the four
    /// content passes in fixed order: URL, username, list, hashtag.
    ///
    /// The pass order is load-bearing: the username and list matchers find
    /// the same superset of occurrences, and the classifier's slug check
    /// decides which pass owns each one.
    pub fn parse(&self, text: &str, mode: Mode) -> ParseResult {
        let mut result = ParseResult {
            reply: reply_target(text),
            ..ParseResult::default()
        };

        match mode {
            Mode::Html => {
                let mut current = text.to_string();
                for kind in PASS_ORDER {
                    current = self.run_pass(&current, kind, true, &mut result);
                }
                result.html = Some(current);
            }
            Mode::Entities => {
                for kind in PASS_ORDER {
                    self.run_pass(text, kind, false, &mut result);
                }
            }
        }
        result
    }

    /// One left-to-right, non-overlapping scan of `text` for a single
    /// entity kind: copy unmatched stretches verbatim, splice replacements
    /// for accepted matches, copy rejected matches untouched. Offsets are
    /// tracked explicitly in both bytes (for slicing) and characters (for
    /// recorded spans).
    fn run_pass(
        &self,
        text: &str,
        kind: PassKind,
        render: bool,
        result: &mut ParseResult,
    ) -> String {
        let mut out = String::with_capacity(if render { text.len() } else { 0 });
        let mut cursor = 0usize;
        let mut char_cursor = 0usize;

        for caps in matcher(kind).captures_iter(text) {
            let mat = caps.get(0).unwrap();
            char_cursor += text[cursor..mat.start()].chars().count();
            let char_start = char_cursor;
            let char_end = char_start + mat.as_str().chars().count();

            if render {
                out.push_str(&text[cursor..mat.start()]);
            }
            // `None` means pass through; only consulted when rendering.
            match self.handle_match(kind, &caps, char_start, char_end, render, result) {
                Some(replacement) if render => out.push_str(&replacement),
                None if render => out.push_str(mat.as_str()),
                _ => {}
            }

            cursor = mat.end();
            char_cursor = char_end;
        }
        if render {
            out.push_str(&text[cursor..]);
        }
        out
    }

    fn handle_match(
        &self,
        kind: PassKind,
        caps: &Captures,
        char_start: usize,
        char_end: usize,
        render: bool,
        result: &mut ParseResult,
    ) -> Option<String> {
        match kind {
            PassKind::Url => {
                let hit = classify::url(caps)?;
                result.urls.push(UrlEntity {
                    url: hit.url.to_string(),
                    span: self.entity_span(char_start + hit.pre.chars().count(), char_end),
                });
                render.then(|| {
                    let display =
                        format::shorten_url(&format::escape(hit.url), self.max_url_length);
                    format!("{}{}", hit.pre, self.formatter.format_url(&hit.full_url, &display))
                })
            }
            PassKind::Username => {
                let hit = classify::username(caps)?;
                result.users.push(MentionEntity {
                    username: hit.username.to_string(),
                    span: self.entity_span(char_start, char_end),
                });
                render.then(|| self.formatter.format_username(hit.at, hit.username))
            }
            PassKind::List => {
                let hit = classify::list(caps)?;
                result.lists.push(ListEntity {
                    username: hit.username.to_string(),
                    list: hit.list.to_string(),
                    span: self.entity_span(char_start, char_end),
                });
                render.then(|| {
                    format!(
                        "{}{}",
                        hit.pre,
                        self.formatter.format_list(hit.at, hit.username, hit.list)
                    )
                })
            }
            PassKind::Tag => {
                let hit = classify::tag(caps);
                result.tags.push(TagEntity {
                    tag: hit.tag.to_string(),
                    span: self.entity_span(char_start + hit.pre.chars().count(), char_end),
                });
                render.then(|| {
                    format!("{}{}", hit.pre, self.formatter.format_tag(hit.sigil, hit.tag))
                })
            }
        }
    }

    fn entity_span(&self, start: usize, end: usize) -> Option<Span> {
        self.include_spans.then(|| Span::new(start, end))
    }
}

/// Anchored reply check, independent of the content passes: skip space-like
/// characters, require a sigil, capture the username.
fn reply_target(text: &str) -> Option<String> {
    patterns::REPLY
        .captures(text)
        .map(|caps| caps["user"].to_string())
}

#[derive(Clone, Copy, Debug)]
enum PassKind {
    Url,
    Username,
    List,
    Tag,
}

const PASS_ORDER: [PassKind; 4] = [
    PassKind::Url,
    PassKind::Username,
    PassKind::List,
    PassKind::Tag,
];

fn matcher(kind: PassKind) -> &'static Regex {
    match kind {
        PassKind::Url => &patterns::URL,
        PassKind::Username => &patterns::USERNAME,
        PassKind::List => &patterns::LIST,
        PassKind::Tag => &patterns::HASHTAG,
    }
}

#[cfg(test)]
mod reply_tests {
    use super::reply_target;

    #[test]
    fn reply_at_start() {
        assert_eq!(reply_target("@carol thanks!"), Some("carol".to_string()));
    }

    #[test]
    fn reply_after_unicode_whitespace() {
        assert_eq!(
            reply_target("\u{00A0} @carol hi"),
            Some("carol".to_string())
        );
    }

    #[test]
    fn no_reply_mid_text() {
        assert_eq!(reply_target("thanks @carol"), None);
        assert_eq!(reply_target(""), None);
    }
}
