//! Order summary built from the cart.

use std::fmt::Write as _;

use crate::cart::{CartItem, CartPersistence, CartStore};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    pub is_preorder: bool,
    pub preorder_message: Option<String>,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.id,
            title: item.title.clone(),
            quantity: item.quantity,
            unit_price: item.price,
            line_total: item.line_total(),
            is_preorder: item.is_preorder,
            preorder_message: item.preorder_message.clone(),
        }
    }
}

/// Everything the order message needs, read from the cart's query surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total_items: i64,
    pub total_price: Money,
}

impl OrderSummary {
    /// Summarize the cart. Fails on an empty cart.
    pub fn from_store<P: CartPersistence>(store: &CartStore<P>) -> Result<Self, CommerceError> {
        if store.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(Self {
            lines: store.items().iter().map(OrderLine::from).collect(),
            total_items: store.total_items(),
            total_price: store.total_price(),
        })
    }

    /// Render the message sent to the gallery.
    ///
    /// ```text
    /// Hello! I would like to place an order:
    ///
    /// 1. Indigo Print x2 - $20.00
    /// 2. Commission x1 - $0.00 (preorder)
    ///    Note: please rush
    ///
    /// Total items: 3
    /// Total: $20.00
    /// ```
    pub fn render(&self, greeting: &str) -> String {
        let mut out = String::new();
        let greeting = greeting.trim();
        if !greeting.is_empty() {
            out.push_str(greeting);
            out.push_str("\n\n");
        }

        for (n, line) in self.lines.iter().enumerate() {
            let _ = write!(
                out,
                "{}. {} x{} - {}",
                n + 1,
                line.title,
                line.quantity,
                line.line_total
            );
            if line.is_preorder {
                out.push_str(" (preorder)");
            }
            out.push('\n');
            if let Some(note) = &line.preorder_message {
                let _ = writeln!(out, "   Note: {}", note);
            }
        }

        let _ = write!(
            out,
            "\nTotal items: {}\nTotal: {}",
            self.total_items, self.total_price
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MemoryPersistence;
    use crate::catalog::ProductSnapshot;
    use crate::config::CartConfig;
    use crate::money::Currency;

    fn store() -> CartStore<MemoryPersistence> {
        let mut store = CartStore::initialize(MemoryPersistence::new(), &CartConfig::default());
        let print = ProductSnapshot::new(1u64, "Indigo Print", "", Money::new(1000, Currency::USD));
        let commission = ProductSnapshot::new(2u64, "Commission", "", Money::zero(Currency::USD));
        store.add_item(&print, 2).unwrap();
        store.add_preorder_item(&commission, Some("please rush")).unwrap();
        store
    }

    #[test]
    fn test_summary_from_store() {
        let summary = OrderSummary::from_store(&store()).unwrap();

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_price, Money::new(2000, Currency::USD));
        assert_eq!(summary.lines[0].line_total.amount_cents, 2000);
        assert!(summary.lines[1].is_preorder);
    }

    #[test]
    fn test_render() {
        let summary = OrderSummary::from_store(&store()).unwrap();
        let expected = "Hello! I would like to place an order:\n\n\
                        1. Indigo Print x2 - $20.00\n\
                        2. Commission x1 - $0.00 (preorder)\n   \
                        Note: please rush\n\
                        \n\
                        Total items: 3\n\
                        Total: $20.00";

        assert_eq!(
            summary.render("Hello! I would like to place an order:"),
            expected
        );
    }

    #[test]
    fn test_render_without_greeting() {
        let summary = OrderSummary::from_store(&store()).unwrap();
        assert!(summary.render("  ").starts_with("1. Indigo Print"));
    }

    #[test]
    fn test_empty_cart_has_no_summary() {
        let store = CartStore::initialize(MemoryPersistence::new(), &CartConfig::default());
        assert!(matches!(
            OrderSummary::from_store(&store),
            Err(CommerceError::EmptyCart)
        ));
    }
}
