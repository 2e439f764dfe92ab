//! Authorization header selection.
//!
//! Two header policies have shipped in the mobile app over time. Both are
//! kept as named configurations so a deployment states which one it runs.

use std::fmt;
use std::str::FromStr;

/// Which credential a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Basic base64(consumer_key:consumer_secret)`
    Basic,
    /// `Authorization: Bearer <user token>`
    Bearer,
}

/// Policy deciding the [`AuthScheme`] for each REST endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPolicy {
    /// Catalog reads (`/products` and everything under it, including
    /// `/products/categories`) always use the application credential.
    /// Every other endpoint uses the bearer token when one is set.
    #[default]
    CatalogBasic,
    /// Every endpoint uses the bearer token when one is set.
    PreferBearer,
}

impl AuthPolicy {
    /// Scheme for a request to `path` (relative to the `wc/v3` base).
    #[must_use]
    pub fn scheme_for(self, path: &str, has_token: bool) -> AuthScheme {
        if !has_token {
            return AuthScheme::Basic;
        }
        match self {
            Self::CatalogBasic if is_catalog_path(path) => AuthScheme::Basic,
            Self::CatalogBasic | Self::PreferBearer => AuthScheme::Bearer,
        }
    }
}

/// Whether `path` is in the public catalog namespace.
fn is_catalog_path(path: &str) -> bool {
    path == "/products" || path.starts_with("/products/") || path.starts_with("/products?")
}

impl fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogBasic => write!(f, "catalog-basic"),
            Self::PreferBearer => write!(f, "prefer-bearer"),
        }
    }
}

impl FromStr for AuthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog-basic" => Ok(Self::CatalogBasic),
            "prefer-bearer" => Ok(Self::PreferBearer),
            other => Err(format!(
                "invalid auth policy: {other} (expected catalog-basic or prefer-bearer)"
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_without_token_always_basic() {
        for policy in [AuthPolicy::CatalogBasic, AuthPolicy::PreferBearer] {
            assert_eq!(policy.scheme_for("/products", false), AuthScheme::Basic);
            assert_eq!(policy.scheme_for("/customers/3", false), AuthScheme::Basic);
        }
    }

    #[test]
    fn test_catalog_basic_keeps_catalog_on_basic() {
        let policy = AuthPolicy::CatalogBasic;
        assert_eq!(policy.scheme_for("/products", true), AuthScheme::Basic);
        assert_eq!(policy.scheme_for("/products/42", true), AuthScheme::Basic);
        assert_eq!(
            policy.scheme_for("/products/categories", true),
            AuthScheme::Basic
        );
        assert_eq!(policy.scheme_for("/customers/3", true), AuthScheme::Bearer);
    }

    #[test]
    fn test_catalog_prefix_must_be_whole_segment() {
        assert_eq!(
            AuthPolicy::CatalogBasic.scheme_for("/products-export", true),
            AuthScheme::Bearer
        );
    }

    #[test]
    fn test_prefer_bearer_everywhere() {
        let policy = AuthPolicy::PreferBearer;
        assert_eq!(policy.scheme_for("/products", true), AuthScheme::Bearer);
        assert_eq!(policy.scheme_for("/customers/3", true), AuthScheme::Bearer);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(
            "catalog-basic".parse::<AuthPolicy>().unwrap(),
            AuthPolicy::CatalogBasic
        );
        assert_eq!(
            " Prefer-Bearer ".parse::<AuthPolicy>().unwrap(),
            AuthPolicy::PreferBearer
        );
        assert!("basic".parse::<AuthPolicy>().is_err());
        assert_eq!(AuthPolicy::PreferBearer.to_string(), "prefer-bearer");
    }
}
