//! The five entity matchers, built from named character-class fragments.
//!
//! The grammars here are data, not logic: each pattern is assembled from the
//! constants below and compiled once. Classification and precedence decisions
//! live in `classify`; nothing in this module inspects match contents.
//!
//! Character ranges follow the twitter-text grammar for mentions, lists,
//! hashtags and URLs (Latin script plus the Latin-1 supplement).

use once_cell::sync::Lazy;
use regex::Regex;

/// Mention sigils: `@` and its fullwidth variant.
const AT_SIGNS: &str = "[@\u{FF20}]";

/// Word characters legal in hashtag bodies.
const TAG_WORD: &str = r"a-z0-9_\u{00c0}-\u{00d6}\u{00d8}-\u{00f6}\u{00f8}-\u{00ff}";

/// Space-like characters a reply mention may be preceded by.
const SPACES: &str = r"[\u{0020}\u{00A0}\u{1680}\u{180E}\u{2002}-\u{202F}\u{205F}\u{2060}\u{3000}]";

/// A username is 1-20 word characters; a list slug is a `/`, a letter, then
/// up to 79 slug characters.
const MENTION_TAIL: &str =
    r"(?P<user>[a-z0-9_]{1,20})(?P<slug>/[a-z][a-z0-9\u{0080}-\u{00FF}-]{0,79})?";

// URL fragments.
const URL_PRE: &str = r#"(?:[^/"':!=]|^|:)"#;
const URL_DOMAIN: &str = r"(?:[.-]|[^\s_!./])+\.[a-z]{2,}(?::[0-9]+)?";
const URL_PATH: &str = r"(?:[.,]?[{w}!*'();:=+$/%#\[\]\-_,~@])";
const URL_PATH_END: &str = r"[{w})=#/]";
const URL_QUERY: &str = r"[a-z0-9!*'();:&=+$/%#\[\]\-_.,~]";
const URL_QUERY_END: &str = r"[a-z0-9_&=#]";

fn expand_word(fragment: &str) -> String {
    fragment.replace("{w}", TAG_WORD)
}

/// Standalone mention: `@user`, provided the sigil does not sit on a word
/// boundary (so `mail@example.com` is not a mention). The slug group exists
/// only so the classifier can hand list references over to the list pass.
pub(crate) static USERNAME: Lazy<Regex> = Lazy::new(|| {
    let pattern = ["(?i)\\B", AT_SIGNS, MENTION_TAIL].concat();
    Regex::new(&pattern).expect("username pattern")
});

/// List reference: one leading context character (or start of text), a run of
/// sigils, a username and an optional slug. Without the slug the occurrence
/// belongs to the username pass.
pub(crate) static LIST: Lazy<Regex> = Lazy::new(|| {
    let pattern = [
        "(?i)(?P<pre>[^a-z0-9_]|^)(?P<at>",
        AT_SIGNS,
        "+)",
        MENTION_TAIL,
    ]
    .concat();
    Regex::new(&pattern).expect("list pattern")
});

/// Reply anchor: optional space-like characters, a sigil, then the username.
pub(crate) static REPLY: Lazy<Regex> = Lazy::new(|| {
    let pattern = [
        "(?i)^(?:",
        SPACES,
        ")*",
        AT_SIGNS,
        "(?P<user>[a-z0-9_]{1,20})",
    ]
    .concat();
    Regex::new(&pattern).expect("reply pattern")
});

/// Hashtag: leading context (which may itself contain a sigil character, see
/// the classifier's trimming rule), a `#` or fullwidth `＃`, and a tag body
/// containing at least one letter or underscore.
pub(crate) static HASHTAG: Lazy<Regex> = Lazy::new(|| {
    let pattern = [
        "(?i)(?:^|[^0-9a-z&/]+)(?:#|\u{FF03})(?:[0-9a-z_]*[a-z_]+[",
        TAG_WORD,
        "]*)",
    ]
    .concat();
    Regex::new(&pattern).expect("hashtag pattern")
});

/// URL: one character of leading context, an `http(s)://` or `www.` opener,
/// a domain, then optional path and query parts with restricted final
/// characters (so `see http://x.com/page.` does not swallow the period).
pub(crate) static URL: Lazy<Regex> = Lazy::new(|| {
    let path = expand_word(URL_PATH);
    let path_end = expand_word(URL_PATH_END);
    let pattern = [
        "(?i)(?P<pre>",
        URL_PRE,
        ")(?P<url>(?:https?://|www\\.)(?P<domain>",
        URL_DOMAIN,
        ")(?:/(?:",
        path.as_str(),
        "*",
        path_end.as_str(),
        ")?)?(?:\\?",
        URL_QUERY,
        "*",
        URL_QUERY_END,
        ")?)",
    ]
    .concat();
    Regex::new(&pattern).expect("url pattern")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_requires_non_word_boundary() {
        assert!(USERNAME.is_match("@bob"));
        assert!(USERNAME.is_match("hi @bob"));
        assert!(!USERNAME.is_match("mail@example"));
    }

    #[test]
    fn username_accepts_fullwidth_sigil() {
        let caps = USERNAME.captures("\u{FF20}bob").unwrap();
        assert_eq!(&caps["user"], "bob");
    }

    #[test]
    fn username_captures_list_slug() {
        let caps = USERNAME.captures("@bob/mylist").unwrap();
        assert_eq!(&caps["user"], "bob");
        assert_eq!(caps.name("slug").unwrap().as_str(), "/mylist");
    }

    #[test]
    fn list_requires_context_or_start() {
        let caps = LIST.captures("@bob/mylist").unwrap();
        assert_eq!(&caps["pre"], "");
        assert_eq!(&caps["at"], "@");
        assert_eq!(&caps["user"], "bob");

        let caps = LIST.captures(" @@bob/mylist").unwrap();
        assert_eq!(&caps["pre"], " ");
        assert_eq!(&caps["at"], "@@");
    }

    #[test]
    fn list_slug_length_is_bounded() {
        let long = format!("@bob/a{}", "b".repeat(79));
        let caps = LIST.captures(&long).unwrap();
        assert_eq!(caps.name("slug").unwrap().as_str().len(), 81);
    }

    #[test]
    fn reply_skips_unicode_spaces() {
        let caps = REPLY.captures("\u{00A0}\u{3000}@carol hi").unwrap();
        assert_eq!(&caps["user"], "carol");
        assert!(REPLY.captures("x @carol").is_none());
    }

    #[test]
    fn hashtag_needs_a_letter() {
        assert!(HASHTAG.is_match("#fun"));
        assert!(HASHTAG.is_match("#1fun"));
        assert!(!HASHTAG.is_match("#123"));
    }

    #[test]
    fn hashtag_rejects_entity_reference_context() {
        assert!(!HASHTAG.is_match("&#123;"));
        assert!(HASHTAG.is_match("a #tag"));
    }

    #[test]
    fn url_requires_scheme_or_www() {
        assert!(URL.is_match("http://example.com"));
        assert!(URL.is_match("www.example.com"));
        assert!(!URL.is_match("example.com"));
    }

    #[test]
    fn url_path_does_not_swallow_trailing_period() {
        let caps = URL.captures("see http://x.com/page. now").unwrap();
        assert_eq!(&caps["url"], "http://x.com/page");
    }

    #[test]
    fn url_domain_group_includes_port() {
        let caps = URL.captures("http://example.com:8080/a").unwrap();
        assert_eq!(&caps["domain"], "example.com:8080");
    }
}
