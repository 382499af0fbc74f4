//! Product types.

use crate::ids::{CollectionId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Whether a product can ship now or must be preordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Piece is in stock.
    #[default]
    InStock,
    /// Piece is sold out or not yet made; orders are preorders.
    Preorder,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in_stock",
            Availability::Preorder => "preorder",
        }
    }
}

/// A product in the gallery catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Primary image URL.
    pub image: String,
    /// Current price.
    pub price: Money,
    /// Collection this piece belongs to.
    #[serde(default)]
    pub collection_id: Option<CollectionId>,
    /// Stock state.
    #[serde(default)]
    pub availability: Availability,
}

impl Product {
    /// Display data captured into a cart line.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            price: self.price,
        }
    }

    /// Check if the product must be preordered.
    pub fn is_preorder(&self) -> bool {
        self.availability == Availability::Preorder
    }
}

/// Denormalized product data copied into the cart at add time.
///
/// The cart never re-fetches or revalidates these fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Money,
}

impl ProductSnapshot {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: image.into(),
            price,
        }
    }
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        product.snapshot()
    }
}
