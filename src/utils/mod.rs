//! Utility functions and helpers.

pub mod http;
pub mod log;

use url::Url;

/// Resolve a link against a base URL.
///
/// `http(s)` links pass through untouched; anything else is joined onto
/// `base`. Returns `None` when the result is not a valid URL.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Url::parse(href).ok();
    }
    base.join(href).ok()
}

/// Set `param=value` on a URL, replacing any existing value for `param`.
pub fn with_query_param(url: &Url, param: &str, value: &str) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut result = url.clone();
    {
        let mut pairs = result.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(param, value);
    }
    result
}
