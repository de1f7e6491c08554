//! Route matching logic.
//!
//! # Responsibilities
//! - Score a location against one route entry
//! - Reject locations outside the entry's validity region
//! - Describe validity regions so configuration can detect ambiguous tables
//!
//! # Scoring
//! | mode          | valid when                                  | score                |
//! |---------------|---------------------------------------------|----------------------|
//! | param         | pathname equal, declared query pairs present | 110 + declared pairs |
//! | exact         | pathname equal                              | 100                  |
//! | prefix-nested | pathname below entry (extra segment)        | 70 + len / 10        |
//! | prefix        | pathname equal or below entry               | 50 + len / 10        |
//!
//! # Design Decisions
//! - Scores are held in tenths of a point so `len / 10` stays exact
//! - Path matching is case-sensitive and segment-aware (`/a` never matches `/ab`)
//! - A score depends only on the entry; the location only decides validity

use std::collections::BTreeMap;
use std::fmt;

use crate::routing::entry::{MatchMode, RouteEntry};
use crate::routing::location::Location;

/// Match score in tenths of a point. Higher is more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    pub const EXACT: Score = Score(1000);
    const PARAM_BASE: u32 = 1100;
    const PREFIX_NESTED_BASE: u32 = 700;
    const PREFIX_BASE: u32 = 500;

    pub fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    pub fn tenths(&self) -> u32 {
        self.0
    }

    /// Score in points (`51.5` for a prefix entry on `/admin/products`).
    pub fn points(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

fn length_bonus(pathname: &str) -> u32 {
    u32::try_from(pathname.len()).unwrap_or(u32::MAX)
}

/// True when `pathname` starts with `base` followed by `/`.
pub fn is_below(pathname: &str, base: &str) -> bool {
    pathname
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Trait for scoring locations against a compiled route.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Score if the location is valid for this matcher, `None` otherwise.
    fn score(&self, location: &Location) -> Option<Score>;

    /// Score produced for every valid location.
    fn static_score(&self) -> Score;

    /// Set of locations this matcher accepts.
    fn region(&self) -> Region<'_>;
}

/// Matches one pathname exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    pathname: String,
}

impl ExactMatcher {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn score(&self, location: &Location) -> Option<Score> {
        (location.pathname == self.pathname).then_some(self.static_score())
    }

    fn static_score(&self) -> Score {
        Score::EXACT
    }

    fn region(&self) -> Region<'_> {
        Region {
            path: PathRegion::Point(&self.pathname),
            query: None,
        }
    }
}

/// Matches one pathname plus a required subset of query pairs.
#[derive(Debug, Clone)]
pub struct ParamMatcher {
    pathname: String,
    query: BTreeMap<String, String>,
}

impl ParamMatcher {
    pub fn new(pathname: impl Into<String>, query: BTreeMap<String, String>) -> Self {
        Self {
            pathname: pathname.into(),
            query,
        }
    }
}

impl Matcher for ParamMatcher {
    fn score(&self, location: &Location) -> Option<Score> {
        if location.pathname != self.pathname {
            return None;
        }
        location
            .query
            .contains_all(&self.query)
            .then_some(self.static_score())
    }

    fn static_score(&self) -> Score {
        let declared = u32::try_from(self.query.len()).unwrap_or(u32::MAX / 10);
        Score(Score::PARAM_BASE.saturating_add(declared.saturating_mul(10)))
    }

    fn region(&self) -> Region<'_> {
        Region {
            path: PathRegion::Point(&self.pathname),
            query: Some(&self.query),
        }
    }
}

/// Matches a pathname and everything below it.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    base: String,
}

impl PrefixMatcher {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Matcher for PrefixMatcher {
    fn score(&self, location: &Location) -> Option<Score> {
        (location.pathname == self.base || is_below(&location.pathname, &self.base))
            .then_some(self.static_score())
    }

    fn static_score(&self) -> Score {
        Score(Score::PREFIX_BASE.saturating_add(length_bonus(&self.base)))
    }

    fn region(&self) -> Region<'_> {
        Region {
            path: PathRegion::Subtree {
                base: &self.base,
                include_base: true,
            },
            query: None,
        }
    }
}

/// Matches only paths with at least one segment below the base.
#[derive(Debug, Clone)]
pub struct NestedPrefixMatcher {
    base: String,
}

impl NestedPrefixMatcher {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Matcher for NestedPrefixMatcher {
    fn score(&self, location: &Location) -> Option<Score> {
        is_below(&location.pathname, &self.base).then_some(self.static_score())
    }

    fn static_score(&self) -> Score {
        Score(Score::PREFIX_NESTED_BASE.saturating_add(length_bonus(&self.base)))
    }

    fn region(&self) -> Region<'_> {
        Region {
            path: PathRegion::Subtree {
                base: &self.base,
                include_base: false,
            },
            query: None,
        }
    }
}

/// Compile the matcher for an entry's match mode.
pub fn compile(entry: &RouteEntry) -> Box<dyn Matcher> {
    match entry.match_mode {
        MatchMode::Exact => Box::new(ExactMatcher::new(entry.pathname.clone())),
        MatchMode::Param => Box::new(ParamMatcher::new(entry.pathname.clone(), entry.query.clone())),
        MatchMode::Prefix => Box::new(PrefixMatcher::new(entry.pathname.clone())),
        MatchMode::PrefixNested => Box::new(NestedPrefixMatcher::new(entry.pathname.clone())),
    }
}

/// Pathnames accepted by a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRegion<'a> {
    Point(&'a str),
    Subtree { base: &'a str, include_base: bool },
}

impl PathRegion<'_> {
    fn overlaps(&self, other: &PathRegion<'_>) -> bool {
        match (*self, *other) {
            (PathRegion::Point(a), PathRegion::Point(b)) => a == b,
            (PathRegion::Point(p), PathRegion::Subtree { base, include_base })
            | (PathRegion::Subtree { base, include_base }, PathRegion::Point(p)) => {
                (include_base && p == base) || is_below(p, base)
            }
            // Two subtrees share a location whenever one base contains the other.
            (PathRegion::Subtree { base: a, .. }, PathRegion::Subtree { base: b, .. }) => {
                a == b || is_below(a, b) || is_below(b, a)
            }
        }
    }
}

/// Locations accepted by a matcher: a path region plus required query pairs.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    pub path: PathRegion<'a>,
    pub query: Option<&'a BTreeMap<String, String>>,
}

impl Region<'_> {
    /// True when some location is accepted by both regions.
    pub fn overlaps(&self, other: &Region<'_>) -> bool {
        if !self.path.overlaps(&other.path) {
            return false;
        }
        match (self.query, other.query) {
            // Conflicting values for a shared key can never both hold.
            (Some(a), Some(b)) => a
                .iter()
                .all(|(key, value)| b.get(key).map_or(true, |other| other == value)),
            _ => true,
        }
    }
}

/// True when two matchers can produce the same score for one location.
pub fn can_tie(a: &dyn Matcher, b: &dyn Matcher) -> bool {
    a.static_score() == b.static_score() && a.region().overlaps(&b.region())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::location::QueryParams;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactMatcher::new("/admin/orders");
        assert_eq!(matcher.score(&Location::path("/admin/orders")), Some(Score::EXACT));
        assert_eq!(matcher.score(&Location::path("/admin/orders/1")), None);
    }

    #[test]
    fn test_param_matcher() {
        let matcher = ParamMatcher::new("/admin/product-menu", query(&[("view", "category")]));
        let loc = Location::new(
            "/admin/product-menu",
            QueryParams::parse("view=category&categoryId=cat_1"),
        );
        assert_eq!(matcher.score(&loc).map(|s| s.points()), Some(111.0));

        let loc = Location::new("/admin/product-menu", QueryParams::parse("view=label"));
        assert_eq!(matcher.score(&loc), None);
        assert_eq!(matcher.score(&Location::path("/admin/product-menu")), None);
    }

    #[test]
    fn test_prefix_matcher() {
        let matcher = PrefixMatcher::new("/admin/products");
        assert_eq!(
            matcher.score(&Location::path("/admin/products")).map(|s| s.points()),
            Some(51.5)
        );
        assert!(matcher.score(&Location::path("/admin/products/new")).is_some());
        assert!(matcher.score(&Location::path("/admin/products-archive")).is_none());
    }

    #[test]
    fn test_nested_prefix_matcher() {
        let matcher = NestedPrefixMatcher::new("/admin/orders");
        assert_eq!(matcher.score(&Location::path("/admin/orders")), None);
        assert!(matcher.score(&Location::path("/admin/orders/")).is_some());
        assert_eq!(
            matcher.score(&Location::path("/admin/orders/abc")).map(|s| s.tenths()),
            Some(713)
        );
    }

    #[test]
    fn test_mode_ordering_on_shared_pathname() {
        let p = "/admin/orders";
        let param = ParamMatcher::new(p, query(&[("view", "x")])).static_score();
        let exact = ExactMatcher::new(p).static_score();
        let nested = NestedPrefixMatcher::new(p).static_score();
        let prefix = PrefixMatcher::new(p).static_score();
        assert!(param > exact && exact > nested && nested > prefix);
    }

    #[test]
    fn test_can_tie() {
        let a = ExactMatcher::new("/admin");
        let b = ExactMatcher::new("/admin");
        let c = ExactMatcher::new("/admin/analytics");
        assert!(can_tie(&a, &b));
        assert!(!can_tie(&a, &c));

        let labels = ParamMatcher::new("/m", query(&[("view", "all-labels")]));
        let menu = ParamMatcher::new("/m", query(&[("view", "menu")]));
        let sort = ParamMatcher::new("/m", query(&[("sort", "name")]));
        assert!(!can_tie(&labels, &menu));
        assert!(can_tie(&labels, &sort));

        let nested = NestedPrefixMatcher::new("/admin/orders");
        let nested_again = NestedPrefixMatcher::new("/admin/orders");
        let prefix = PrefixMatcher::new("/admin/orders");
        assert!(can_tie(&nested, &nested_again));
        assert!(!can_tie(&nested, &prefix));
    }

    #[test]
    fn test_region_overlap() {
        let point = Region {
            path: PathRegion::Point("/admin/orders"),
            query: None,
        };
        let below_only = Region {
            path: PathRegion::Subtree {
                base: "/admin/orders",
                include_base: false,
            },
            query: None,
        };
        let with_base = Region {
            path: PathRegion::Subtree {
                base: "/admin",
                include_base: true,
            },
            query: None,
        };
        assert!(!point.overlaps(&below_only));
        assert!(point.overlaps(&with_base));
        assert!(below_only.overlaps(&with_base));
    }
}
