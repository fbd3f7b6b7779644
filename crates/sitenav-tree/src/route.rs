//! Content routes.
//!
//! A [`Route`] is the canonical form of a sidebar `link`. Canonicalization
//! guarantees a leading `/`, collapses repeated separators, drops `.`
//! segments and resolves `..` segments. A route never has a trailing `/`
//! except for the root route itself.
//!
//! # Example
//!
//! ```
//! use sitenav_tree::Route;
//!
//! let route = Route::parse("protocol//./controller/../overview/").unwrap();
//! assert_eq!(route.as_str(), "/protocol/overview");
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Canonical content route.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Route(String);

/// Reason a link cannot be turned into a [`Route`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Link is empty or whitespace only.
    #[error("link is empty")]
    Empty,
    /// Link contains a character that has no meaning in a content route.
    #[error("invalid character {0:?}")]
    InvalidChar(char),
    /// Link points outside the site (has a URL scheme).
    #[error("external URLs are not content routes")]
    ExternalUrl,
    /// `..` segments climb above the content root.
    #[error("path escapes the content root")]
    EscapesRoot,
}

impl Route {
    /// The root route (`/`).
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// Canonicalize a link into a route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if the link is empty, carries a URL scheme,
    /// contains whitespace, control characters, `\`, `?` or `#`, or if its
    /// `..` segments climb above the root.
    pub fn parse(link: &str) -> Result<Self, RouteError> {
        if link.trim().is_empty() {
            return Err(RouteError::Empty);
        }
        if link.contains("://") {
            return Err(RouteError::ExternalUrl);
        }
        if let Some(c) = link
            .chars()
            .find(|&c| c.is_whitespace() || c.is_control() || matches!(c, '\\' | '?' | '#'))
        {
            return Err(RouteError::InvalidChar(c));
        }

        let mut segments: Vec<&str> = Vec::new();
        for segment in link.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(RouteError::EscapesRoot);
                    }
                }
                other => segments.push(other),
            }
        }

        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// Route as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root route.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Path segments, root first. Empty for the root route.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<Route, _>` be queried with a `&str`.
impl Borrow<str> for Route {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_canonical_route() {
        let route = Route::parse("/protocol/overview").unwrap();
        assert_eq!(route.as_str(), "/protocol/overview");
    }

    #[test]
    fn test_parse_adds_leading_separator() {
        let route = Route::parse("protocol/unit").unwrap();
        assert_eq!(route.as_str(), "/protocol/unit");
    }

    #[test]
    fn test_parse_root() {
        let route = Route::parse("/").unwrap();
        assert!(route.is_root());
        assert_eq!(route, Route::root());
        assert_eq!(route.segments().count(), 0);
    }

    #[test]
    fn test_parse_strips_trailing_separator() {
        let route = Route::parse("/protocol/vault/").unwrap();
        assert_eq!(route.as_str(), "/protocol/vault");
    }

    #[test]
    fn test_parse_collapses_repeated_separators() {
        let route = Route::parse("//protocol///vault").unwrap();
        assert_eq!(route.as_str(), "/protocol/vault");
    }

    #[test]
    fn test_parse_resolves_dot_segments() {
        let route = Route::parse("/protocol/./controller/../vault").unwrap();
        assert_eq!(route.as_str(), "/protocol/vault");
    }

    #[test]
    fn test_parse_dotdot_to_root() {
        let route = Route::parse("/protocol/..").unwrap();
        assert!(route.is_root());
    }

    #[test]
    fn test_parse_rejects_escaping_root() {
        assert_eq!(Route::parse("/../secrets"), Err(RouteError::EscapesRoot));
        assert_eq!(Route::parse("a/../../b"), Err(RouteError::EscapesRoot));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Route::parse(""), Err(RouteError::Empty));
        assert_eq!(Route::parse("   "), Err(RouteError::Empty));
    }

    #[test]
    fn test_parse_rejects_external_url() {
        assert_eq!(Route::parse("https://github.com/org"), Err(RouteError::ExternalUrl));
    }

    #[test]
    fn test_parse_rejects_invalid_chars() {
        assert_eq!(Route::parse("/a b"), Err(RouteError::InvalidChar(' ')));
        assert_eq!(Route::parse("/a\\b"), Err(RouteError::InvalidChar('\\')));
        assert_eq!(Route::parse("/page?x=1"), Err(RouteError::InvalidChar('?')));
        assert_eq!(Route::parse("/page#anchor"), Err(RouteError::InvalidChar('#')));
    }

    #[test]
    fn test_parse_keeps_dotted_file_segments() {
        let route = Route::parse("/code-ref/protocol/GenericUSD.sol/contract.GenericUSD").unwrap();
        assert_eq!(
            route.segments().collect::<Vec<_>>(),
            vec!["code-ref", "protocol", "GenericUSD.sol", "contract.GenericUSD"]
        );
    }

    #[test]
    fn test_from_str_matches_parse() {
        let route: Route = "/protocol/unit".parse().unwrap();
        assert_eq!(route, Route::parse("/protocol/unit").unwrap());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let route = Route::parse("/protocol/unit").unwrap();
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json, "/protocol/unit");
    }
}
