//! Path normalization.
//!
//! Logged and filtered paths replace route parameter values with `:name`
//! placeholders so that `/users/42` and `/users/43` aggregate under
//! `/users/:id`.

use percent_encoding::percent_decode_str;

/// Builds the normalized path for a request.
///
/// `path` is the raw URI path and is percent-decoded first, since route
/// parameter values arrive decoded. Each parameter's value is then replaced
/// by `:name` at its first occurrence, applied cumulatively in parameter
/// order. The raw query string is appended afterwards so that it never
/// takes part in substitution.
pub fn normalize_path<'a, I>(path: &str, query: Option<&str>, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut normalized = percent_decode_str(path).decode_utf8_lossy().into_owned();
    for (name, value) in params {
        // An empty value would match at offset zero.
        if value.is_empty() {
            continue;
        }
        normalized = normalized.replacen(value, &format!(":{name}"), 1);
    }

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        normalized.push('?');
        normalized.push_str(query);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_param() {
        assert_eq!(
            normalize_path("/users/42", None, [("id", "42")]),
            "/users/:id"
        );
    }

    #[test]
    fn test_multiple_params_accumulate() {
        assert_eq!(
            normalize_path(
                "/users/7/orders/19",
                None,
                [("user_id", "7"), ("order_id", "19")]
            ),
            "/users/:user_id/orders/:order_id"
        );
    }

    #[test]
    fn test_repeated_value_replaces_first_occurrence_per_param() {
        assert_eq!(
            normalize_path("/a/5/b/5", None, [("x", "5"), ("y", "5")]),
            "/a/:x/b/:y"
        );
    }

    #[test]
    fn test_query_appended_after_substitution() {
        assert_eq!(
            normalize_path("/users/42", Some("id=42&page=2"), [("id", "42")]),
            "/users/:id?id=42&page=2"
        );
    }

    #[test]
    fn test_empty_query_not_appended() {
        assert_eq!(normalize_path("/health", Some(""), []), "/health");
    }

    #[test]
    fn test_percent_encoded_value() {
        assert_eq!(
            normalize_path("/users/John%20Doe", None, [("name", "John Doe")]),
            "/users/:name"
        );
        assert_eq!(
            normalize_path("/users/caf%C3%A9/posts", Some("q=a%20b"), [("name", "café")]),
            "/users/:name/posts?q=a%20b"
        );
    }

    #[test]
    fn test_encoded_static_segment_is_decoded() {
        assert_eq!(normalize_path("/docs/read%20me", None, []), "/docs/read me");
    }

    #[test]
    fn test_empty_param_value_ignored() {
        assert_eq!(normalize_path("/files/", None, [("name", "")]), "/files/");
    }
}
