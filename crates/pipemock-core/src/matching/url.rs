//! URL pattern matching with path parameters and wildcards.
//!
//! Patterns and URLs are compared by path only: scheme, host, query string
//! and fragment are dropped, a trailing slash is ignored and the leading
//! slash is optional, so the relative pattern `tasks` matches `/tasks`.

use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlMatchResult {
    pub matched: bool,
    pub params: HashMap<String, String>,
}

pub fn url_matches(pattern: &str, url: &str) -> UrlMatchResult {
    let pattern = normalize_path(pattern);
    let url = normalize_path(url);

    let Some((regex, param_names)) = pattern_to_regex(&pattern) else {
        tracing::warn!(%pattern, "route url pattern does not compile");
        return UrlMatchResult::default();
    };

    let Some(caps) = regex.captures(&url) else {
        return UrlMatchResult::default();
    };

    let params = param_names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| caps.get(i + 1).map(|m| (name, m.as_str().to_owned())))
        .collect();

    UrlMatchResult {
        matched: true,
        params,
    }
}

/// Reduce a URL or pattern to `/path` form.
pub fn normalize_path(url: &str) -> String {
    let without_origin = match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => url,
    };
    let path = without_origin
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim_matches('/');
    format!("/{path}")
}

/// `{name}` captures one segment, `*` matches anything (slashes included).
fn pattern_to_regex(pattern: &str) -> Option<(Regex, Vec<String>)> {
    let mut param_names = Vec::new();
    let mut regex_str = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                param_names.push(name);
                regex_str.push_str("([^/]+)");
            }
            '*' => regex_str.push_str(".*"),
            _ => regex_str.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    let regex = Regex::new(&format!("^{regex_str}$")).ok()?;
    Some((regex, param_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/users", "/api/users", true, &[])]
    #[case("/api/users", "/api/users/", true, &[])]
    #[case("/api/users/{id}", "/api/users/123", true, &[("id", "123")])]
    #[case("/api/users/{a}/posts/{b}", "/api/users/1/posts/2", true, &[("a", "1"), ("b", "2")])]
    #[case("/api/users", "/api/posts", false, &[])]
    #[case("/api/users/{id}", "/api/users", false, &[])]
    #[case("/api/users/{id}", "/api/users/123/extra", false, &[])]
    #[case("/", "/", true, &[])]
    #[case("/api/users", "/api/users?page=1", true, &[])]
    #[case("/api/users.json", "/api/users.json", true, &[])]
    #[case("/api/users.json", "/api/usersXjson", false, &[])]
    fn test_url_matches(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
        #[case] params: &[(&str, &str)],
    ) {
        let result = url_matches(pattern, url);
        assert_eq!(result.matched, expected);
        for (k, v) in params {
            assert_eq!(result.params.get(*k), Some(&(*v).to_owned()));
        }
    }

    #[rstest]
    #[case("tasks", "/tasks", true)]
    #[case("tasks", "tasks", true)]
    #[case("tasks", "/tasks/123", false)]
    #[case("tasks/*", "/tasks/123", true)]
    #[case("tasks/*", "/tasks/a/b", true)]
    #[case("tasks/*", "/tasks", false)]
    #[case("tasks/*", "/taskset/1", false)]
    #[case("tasks/123", "/tasks/123", true)]
    #[case("tasks/123", "/tasks/1234", false)]
    #[case("pageTestWebLink", "/pageTestWebLink?offset=1&limit=2", true)]
    #[case("pageTestWebLink", "http://localhost:8080/pageTestWebLink", true)]
    #[case("*", "/anything/at/all", true)]
    fn test_url_matches_relative_and_wildcards(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(url_matches(pattern, url).matched, expected);
    }

    #[rstest]
    #[case("tasks", "/tasks")]
    #[case("/tasks/", "/tasks")]
    #[case("", "/")]
    #[case("/a?b=c#frag", "/a")]
    #[case("http://fakeLink.com?offset=2&limit=2", "/")]
    #[case("https://example.com/tasks/1?x=y", "/tasks/1")]
    fn test_normalize_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(input), expected);
    }
}
