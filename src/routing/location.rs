//! Requested locations: a pathname plus query parameters.
//!
//! The query-string contract follows `application/x-www-form-urlencoded`
//! (the same scheme browsers use for `URLSearchParams`), so hrefs built
//! here round-trip through the surrounding application unchanged.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Ordered query parameters. Repeated keys are kept; lookups return the
/// first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// True when every `required` pair is present with an equal value.
    /// Extra keys are ignored.
    pub fn contains_all(&self, required: &BTreeMap<String, String>) -> bool {
        required
            .iter()
            .all(|(key, value)| self.get(key) == Some(value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Serialize a declared query map as a query string (no leading `?`).
pub fn encode_query(query: &BTreeMap<String, String>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish()
}

/// A location the user navigated to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub query: QueryParams,
}

impl Location {
    pub fn new(pathname: impl Into<String>, query: QueryParams) -> Self {
        Self {
            pathname: pathname.into(),
            query,
        }
    }

    /// Location without query parameters.
    pub fn path(pathname: impl Into<String>) -> Self {
        Self::new(pathname, QueryParams::new())
    }

    /// Split an href such as `/admin/product-menu?view=menu#top` into its
    /// pathname and query. The fragment is dropped.
    pub fn parse(href: &str) -> Self {
        let href = href.split_once('#').map_or(href, |(before, _)| before);
        match href.split_once('?') {
            Some((pathname, query)) => Self::new(pathname, QueryParams::parse(query)),
            None => Self::path(href),
        }
    }

    /// First path segment strictly below `base`, if the pathname extends it.
    ///
    /// `/admin/orders/abc/items` below `/admin/orders` yields `abc`.
    pub fn segment_after(&self, base: &str) -> Option<&str> {
        let rest = self.pathname.strip_prefix(base)?.strip_prefix('/')?;
        let segment = rest.split('/').next().unwrap_or_default();
        (!segment.is_empty()).then_some(segment)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.pathname)
        } else {
            write!(f, "{}?{}", self.pathname, self.query.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_href() {
        let loc = Location::parse("/admin/product-menu?view=category&categoryId=cat_1");
        assert_eq!(loc.pathname, "/admin/product-menu");
        assert_eq!(loc.query.get("view"), Some("category"));
        assert_eq!(loc.query.get("categoryId"), Some("cat_1"));
        assert_eq!(loc.query.get("missing"), None);
    }

    #[test]
    fn test_parse_without_query_and_fragment() {
        let loc = Location::parse("/admin/orders#summary");
        assert_eq!(loc.pathname, "/admin/orders");
        assert!(loc.query.is_empty());
    }

    #[test]
    fn test_first_value_wins() {
        let query = QueryParams::parse("view=menu&view=label");
        assert_eq!(query.get("view"), Some("menu"));
    }

    #[test]
    fn test_percent_decoding() {
        let query = QueryParams::parse("?name=Cold%20Brew&tag=a+b");
        assert_eq!(query.get("name"), Some("Cold Brew"));
        assert_eq!(query.get("tag"), Some("a b"));
    }

    #[test]
    fn test_contains_all_ignores_extra_keys() {
        let mut required = BTreeMap::new();
        required.insert("view".to_string(), "all-categories".to_string());

        let query = QueryParams::parse("view=all-categories&foo=bar");
        assert!(query.contains_all(&required));

        let query = QueryParams::parse("view=all-labels");
        assert!(!query.contains_all(&required));
        assert!(QueryParams::new().contains_all(&BTreeMap::new()));
    }

    #[test]
    fn test_segment_after() {
        let loc = Location::path("/admin/orders/abc123/items/456");
        assert_eq!(loc.segment_after("/admin/orders"), Some("abc123"));
        assert_eq!(Location::path("/admin/orders").segment_after("/admin/orders"), None);
        assert_eq!(Location::path("/admin/orders-archive").segment_after("/admin/orders"), None);
        assert_eq!(Location::path("/admin/orders/").segment_after("/admin/orders"), None);
    }

    #[test]
    fn test_display() {
        let loc = Location::new("/admin/product-menu", QueryParams::new().with("view", "all labels"));
        assert_eq!(loc.to_string(), "/admin/product-menu?view=all+labels");
        assert_eq!(Location::path("/admin").to_string(), "/admin");
    }
}
