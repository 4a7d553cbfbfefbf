//! Web linking (`Link` header) helpers for paged reads.
//!
//! Paged endpoints advertise neighbouring pages as
//! `<uri>; rel="next", <uri>; rel="previous"`; the page position travels in
//! the link's `offset` and `limit` query parameters.

use crate::matching::parse_query_string;

/// One entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLink {
    pub uri: String,
    /// Relation type, lowercased; empty when the entry has no `rel`
    pub rel: String,
}

/// Parse a `Link` header value into its entries, in header order.
///
/// Entries without a `<uri>` are skipped.
pub fn parse_link_header(value: &str) -> Vec<WebLink> {
    split_entries(value)
        .into_iter()
        .filter_map(parse_entry)
        .collect()
}

/// Split on commas that are outside `<...>` and quoted strings.
fn split_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_uri = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '<' if !in_quotes => in_uri = true,
            '>' if !in_quotes => in_uri = false,
            '"' if !in_uri => in_quotes = !in_quotes,
            ',' if !in_uri && !in_quotes => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);
    entries
}

fn parse_entry(entry: &str) -> Option<WebLink> {
    let entry = entry.trim();
    let rest = entry.strip_prefix('<')?;
    let (uri, params) = rest.split_once('>')?;

    let rel = params
        .split(';')
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("rel"))
        .map(|(_, value)| value.trim().trim_matches('"').to_lowercase())
        .unwrap_or_default();

    Some(WebLink {
        uri: uri.trim().to_string(),
        rel,
    })
}

/// Neighbouring pages advertised by a `Link` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub next: Option<WebLink>,
    pub previous: Option<WebLink>,
}

impl PageLinks {
    /// `prev` is accepted as an alias of `previous`. A `rel` may list
    /// several space-separated relation types; the first link wins.
    pub fn from_link_header(value: &str) -> Self {
        let mut links = PageLinks::default();
        for link in parse_link_header(value) {
            for rel in link.rel.split_whitespace() {
                let slot = match rel {
                    "next" => &mut links.next,
                    "previous" | "prev" => &mut links.previous,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(link.clone());
                }
            }
        }
        links
    }
}

/// Page position encoded in a link's query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl PageRequest {
    pub fn from_uri(uri: &str) -> Self {
        let query = uri
            .split_once('?')
            .map(|(_, q)| q.split('#').next().unwrap_or(""))
            .map(parse_query_string)
            .unwrap_or_default();

        let number = |name: &str| query.get(name).and_then(|v| v.trim().parse().ok());
        Self {
            offset: number("offset"),
            limit: number("limit"),
        }
    }
}
