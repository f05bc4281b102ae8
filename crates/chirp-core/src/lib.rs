mod classify;
mod entity;
mod format;
mod parser;
mod patterns;
mod span;

pub use entity::{ListEntity, MentionEntity, ParseResult, TagEntity, UrlEntity};
pub use format::{DefaultFormatter, Formatter, escape, shorten_url};
pub use parser::{Mode, Parser};
pub use span::Span;
