//! Small line-matching helpers shared by the line-oriented parsers.

/// Strip a sequence of leading keywords, requiring each to be a whole word.
///
/// Returns the trimmed remainder; `Some("")` when the line is exactly the
/// keyword sequence.
pub(crate) fn strip_words<'a>(line: &'a str, words: &[&str]) -> Option<&'a str> {
    let mut rest = line;
    for word in words {
        rest = rest.trim_start();
        rest = rest.strip_prefix(word)?;
        if let Some(next) = rest.chars().next() {
            if !next.is_whitespace() {
                return None;
            }
        }
    }
    Some(rest.trim_start())
}

/// Like [`strip_words`] but demands a non-empty remainder.
pub(crate) fn args_after<'a>(line: &'a str, words: &[&str]) -> Option<&'a str> {
    strip_words(line, words).filter(|rest| !rest.is_empty())
}

/// First whitespace-separated token after the keyword sequence.
pub(crate) fn token_after<'a>(line: &'a str, words: &[&str]) -> Option<&'a str> {
    args_after(line, words).and_then(first_token)
}

pub(crate) fn first_token(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

pub(crate) fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Loose dotted-decimal shape test (digits and dots only). Exact address
/// validation happens later in the subnet module.
pub(crate) fn is_dotted(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Case-insensitive substring test, used for uplink markers.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}
