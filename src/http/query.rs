use std::collections::HashMap;

use reqwest::Url;

use crate::error::{Error, Result};

const QUERY_BASE: &str = "http://localhost/";

/// Build a query string from key/value pairs.
///
/// Keys and values are form-urlencoded (space becomes `+`), pairs are joined
/// with `&` and the whole string is prefixed with `?`. Pair order follows the
/// map's iteration order. An empty map yields an empty string.
///
/// Only `*-._` and alphanumerics pass through unescaped, so `~` becomes `%7E`
/// while `*` stays literal. Form decoders read either spelling back to the
/// same value.
///
/// ```
/// use std::collections::HashMap;
///
/// let params = HashMap::from([("q".to_string(), "hello world".to_string())]);
/// assert_eq!(apitest::gen_path_param(&params).unwrap(), "?q=hello+world");
/// ```
pub fn gen_path_param(params: &HashMap<String, String>) -> Result<String> {
    if params.is_empty() {
        return Ok(String::new());
    }

    let mut url = Url::parse(QUERY_BASE).map_err(|e| Error::InvalidUrl {
        url: QUERY_BASE.to_string(),
        reason: e.to_string(),
    })?;

    {
        let mut query_pairs = url.query_pairs_mut();
        for (key, value) in params {
            query_pairs.append_pair(key, value);
        }
    }

    Ok(format!("?{}", url.query().unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_empty_string() {
        assert_eq!(gen_path_param(&HashMap::new()).unwrap(), "");
    }

    #[test]
    fn two_pairs_joined_with_ampersand() {
        let query = gen_path_param(&params(&[("key1", "value1"), ("key2", "value2")])).unwrap();

        assert!(query.starts_with('?'));
        let mut pairs: Vec<&str> = query[1..].split('&').collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec!["key1=value1", "key2=value2"]);
    }

    #[test]
    fn keys_and_values_are_escaped() {
        let query = gen_path_param(&params(&[("a b", "c&d=e")])).unwrap();
        assert_eq!(query, "?a+b=c%26d%3De");
    }

    #[test]
    fn tilde_is_escaped_and_star_is_not() {
        let query = gen_path_param(&params(&[("k", "a~b*c")])).unwrap();
        assert_eq!(query, "?k=a%7Eb*c");
    }
}
