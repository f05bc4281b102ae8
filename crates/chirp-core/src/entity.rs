use crate::span::Span;

/// A recognized URL. `url` is the matched text as written (no scheme is
/// synthesized for `www.` forms).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UrlEntity {
    pub url: String,
    pub span: Option<Span>,
}

/// A standalone `@username` mention. The span covers the sigil and the name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MentionEntity {
    pub username: String,
    pub span: Option<Span>,
}

/// A `@username/list` reference. The span covers the raw match, including
/// its one character of leading context.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListEntity {
    pub username: String,
    pub list: String,
    pub span: Option<Span>,
}

/// A `#hashtag`. The span starts at the sigil.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagEntity {
    pub tag: String,
    pub span: Option<Span>,
}

/// Everything one parse produced.
///
/// Each sequence is ordered left to right by position in the scanned text,
/// and spans within a sequence never overlap. A username that is part of a
/// recognized list reference appears only in `lists`, never in `users`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseResult {
    pub urls: Vec<UrlEntity>,
    pub users: Vec<MentionEntity>,
    pub lists: Vec<ListEntity>,
    pub tags: Vec<TagEntity>,
    /// The username this text replies to: a mention at the start of the
    /// text, optionally preceded by whitespace.
    pub reply: Option<String>,
    /// Rendered output; `None` when parsing in entities-only mode.
    pub html: Option<String>,
}
