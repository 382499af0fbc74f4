//! Cart line item.

use crate::catalog::ProductSnapshot;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product line in the cart.
///
/// Field names serialize in camelCase; `price` is a nested [`Money`]
/// object. Title, image and price are a snapshot taken when the line was
/// added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Product image URL (denormalized for display).
    pub image: String,
    /// Unit price at the time of adding.
    pub price: Money,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Whether this line is a preorder.
    #[serde(default)]
    pub is_preorder: bool,
    /// Customer note, only present on preorder lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_message: Option<String>,
}

impl CartItem {
    /// Create an in-stock line.
    pub fn new(product: &ProductSnapshot, quantity: i64) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price,
            quantity,
            is_preorder: false,
            preorder_message: None,
        }
    }

    /// Create a preorder line. Preorder lines always hold a single unit.
    pub fn preorder(product: &ProductSnapshot, message: Option<&str>) -> Self {
        let mut item = Self::new(product, 1);
        item.mark_preorder(message);
        item
    }

    /// Turn this line into a preorder line with the given note.
    pub(crate) fn mark_preorder(&mut self, message: Option<&str>) {
        self.is_preorder = true;
        self.quantity = 1;
        self.preorder_message = normalize_message(message);
    }

    /// Trim the preorder note, dropping it when blank.
    pub(crate) fn normalize_message(&mut self) {
        self.preorder_message = normalize_message(self.preorder_message.as_deref());
    }

    /// Unit price times quantity, clamped at the numeric bounds.
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }

    /// Display data for this line.
    pub fn product(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            price: self.price,
        }
    }
}

/// Trim a note; blank notes become `None`.
fn normalize_message(message: Option<&str>) -> Option<String> {
    message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
