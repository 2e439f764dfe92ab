//! Upstream JSON shapes.
//!
//! Only the fields the storefront reads are declared. WordPress plugins are
//! inconsistent about `null` versus absent and string versus number, so
//! nearly everything is optional and numeric strings go through [`Loose`].

use std::borrow::Cow;

use serde::Deserialize;

/// A scalar that may arrive as a JSON string or a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Text(String),
    Number(serde_json::Number),
}

impl Loose {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategoryRef {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: u64,
    pub name: Option<String>,
    pub price: Option<Loose>,
    pub images: Option<Vec<RawImage>>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub categories: Option<Vec<RawCategoryRef>>,
    pub average_rating: Option<Loose>,
    pub stock_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    pub id: u64,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<RawImage>,
    pub count: Option<u64>,
}

/// Response of `jwt-auth/v1/token`.
#[derive(Debug, Deserialize)]
pub struct RawToken {
    pub token: String,
    pub user_email: Option<String>,
    pub user_nicename: Option<String>,
    pub user_display_name: Option<String>,
}

/// Response of `wp/v2/users/me?context=edit`.
#[derive(Debug, Deserialize)]
pub struct RawProfile {
    pub id: u64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCustomer {
    pub id: u64,
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}
