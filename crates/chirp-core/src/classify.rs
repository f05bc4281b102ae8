//! Per-kind match classification.
//!
//! Each matcher over-approximates its entity kind; the functions here decide
//! whether a raw match really is the kind it claims to be, split off the
//! leading context that must survive rewriting, and normalize the payload.
//! A `None` verdict means "leave the matched text untouched".

use std::borrow::Cow;

use regex::Captures;

/// IANA-registered one-letter second-level domains. Any other one-letter
/// domain under `.com`/`.org`/`.net` is an artifact of the domain grammar
/// and is rejected.
const IANA_ONE_LETTER_DOMAINS: [&str; 6] =
    ["x.com", "x.org", "z.com", "q.net", "q.com", "i.net"];

pub(crate) struct UrlHit<'t> {
    /// Leading context preserved verbatim in rendered output.
    pub pre: &'t str,
    /// The URL exactly as it appears in the text.
    pub url: &'t str,
    /// The URL with a scheme, for hyperlink targets. Borrowed when the text
    /// already carries one, owned when `https://` had to be synthesized.
    pub full_url: Cow<'t, str>,
}

pub(crate) struct MentionHit<'t> {
    pub at: &'t str,
    pub username: &'t str,
}

pub(crate) struct ListHit<'t> {
    pub pre: &'t str,
    pub at: &'t str,
    pub username: &'t str,
    pub list: &'t str,
}

pub(crate) struct TagHit<'t> {
    pub pre: &'t str,
    pub sigil: &'t str,
    pub tag: &'t str,
}

pub(crate) fn url<'t>(caps: &Captures<'t>) -> Option<UrlHit<'t>> {
    let mat = caps.get(0).unwrap().as_str();
    let domain = caps.name("domain").unwrap().as_str();

    // The domain grammar admits `www...com` and `www.-foo.com`; drop them.
    if domain.starts_with(['.', '-']) {
        return None;
    }

    if domain.chars().count() == 5 {
        let tld: String = domain.chars().skip(1).collect::<String>().to_lowercase();
        if matches!(tld.as_str(), ".com" | ".org" | ".net")
            && !IANA_ONE_LETTER_DOMAINS.contains(&domain.to_lowercase().as_str())
        {
            return None;
        }
    }

    if let Some(pos) = mat.find("http") {
        let url = &mat[pos..];
        return Some(UrlHit {
            pre: &mat[..pos],
            url,
            full_url: Cow::Borrowed(url),
        });
    }

    // No scheme in the match; anchor on `www` and force https for the link
    // target while keeping the recorded payload as written.
    let pos = find_www(mat)?;
    let url = &mat[pos..];
    Some(UrlHit {
        pre: &mat[..pos],
        url,
        full_url: Cow::Owned(format!("https://{}", url)),
    })
}

pub(crate) fn username<'t>(caps: &Captures<'t>) -> Option<MentionHit<'t>> {
    // A slug means this occurrence is a list reference; the list pass owns it.
    if caps.name("slug").is_some() {
        return None;
    }
    let mat = caps.get(0).unwrap().as_str();
    let sigil_len = mat.chars().next().map(char::len_utf8)?;
    Some(MentionHit {
        at: &mat[..sigil_len],
        username: &mat[sigil_len..],
    })
}

pub(crate) fn list<'t>(caps: &Captures<'t>) -> Option<ListHit<'t>> {
    // No slug means this occurrence is a bare mention; the username pass
    // owns it.
    let slug = caps.name("slug")?;
    Some(ListHit {
        pre: caps.name("pre").unwrap().as_str(),
        at: caps.name("at").unwrap().as_str(),
        username: caps.name("user").unwrap().as_str(),
        list: &slug.as_str()[1..],
    })
}

/// Splits a raw hashtag match at its rightmost sigil. The leading context
/// group can itself contain `#`, so the split point cannot come from the
/// matcher's captures.
///
/// Panics if the match holds no sigil at all: the hashtag grammar makes the
/// sigil mandatory, so a sigil-free match means the pattern set is defective
/// and recording anything would silently corrupt the result.
pub(crate) fn tag<'t>(caps: &Captures<'t>) -> TagHit<'t> {
    let mat = caps.get(0).unwrap().as_str();
    let pos = match (mat.rfind('#'), mat.rfind('\u{FF03}')) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => panic!("hashtag match {:?} contains no sigil", mat),
    };
    let sigil_len = mat[pos..].chars().next().map_or(1, char::len_utf8);
    TagHit {
        pre: &mat[..pos],
        sigil: &mat[pos..pos + sigil_len],
        tag: &mat[pos + sigil_len..],
    }
}

fn find_www(text: &str) -> Option<usize> {
    text.as_bytes()
        .windows(3)
        .position(|w| w.eq_ignore_ascii_case(b"www"))
}
