//! Product stock status.

use serde::{Deserialize, Serialize};

/// Stock status reported by WooCommerce for a product.
///
/// Only [`StockStatus::InStock`] counts as available for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StockStatus {
    #[serde(rename = "instock")]
    InStock,
    #[default]
    #[serde(rename = "outofstock")]
    OutOfStock,
    #[serde(rename = "onbackorder")]
    OnBackorder,
}

impl StockStatus {
    /// Map an upstream `stock_status` value; unknown or missing values are out of stock.
    #[must_use]
    pub fn from_upstream(raw: Option<&str>) -> Self {
        match raw {
            Some("instock") => Self::InStock,
            Some("onbackorder") => Self::OnBackorder,
            _ => Self::OutOfStock,
        }
    }

    /// Whether the product can be bought right now.
    #[must_use]
    pub const fn is_in_stock(self) -> bool {
        matches!(self, Self::InStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "instock"),
            Self::OutOfStock => write!(f, "outofstock"),
            Self::OnBackorder => write!(f, "onbackorder"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_upstream() {
        assert_eq!(StockStatus::from_upstream(Some("instock")), StockStatus::InStock);
        assert_eq!(
            StockStatus::from_upstream(Some("onbackorder")),
            StockStatus::OnBackorder
        );
        assert_eq!(StockStatus::from_upstream(None), StockStatus::OutOfStock);
        assert_eq!(
            StockStatus::from_upstream(Some("discontinued")),
            StockStatus::OutOfStock
        );
    }

    #[test]
    fn test_only_instock_is_available() {
        assert!(StockStatus::InStock.is_in_stock());
        assert!(!StockStatus::OnBackorder.is_in_stock());
        assert!(!StockStatus::OutOfStock.is_in_stock());
    }
}
