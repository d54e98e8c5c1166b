//! Repeatable, comma-separated query parameters.
//!
//! Filters such as `topic` and `language` accept several values, either as
//! repeated keys (`language=en&language=fr`) or comma-separated
//! (`language=en,fr`), or both.

use url::form_urlencoded;

/// Decodes a raw query string into ordered key/value pairs.
///
/// Repeated keys are kept.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Collects every value of a repeatable parameter.
///
/// Each occurrence is split on `,`; order and duplicates are kept, tokens
/// are not trimmed, and empty tokens are dropped.
///
/// # Example
///
/// ```
/// use folio_rest::extractors::{list_param, query_pairs};
///
/// let pairs = query_pairs("topic=pirates,sea&topic=war&language=en");
/// assert_eq!(list_param(&pairs, "topic"), vec!["pirates", "sea", "war"]);
/// assert!(list_param(&pairs, "author").is_empty());
/// ```
pub fn list_param(pairs: &[(String, String)], name: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(key, _)| key == name)
        .flat_map(|(_, value)| value.split(','))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the last value of a single-valued parameter, if present and
/// non-empty.
pub fn single_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}
