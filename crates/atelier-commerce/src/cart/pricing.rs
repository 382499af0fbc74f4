//! Cart totals.

use crate::cart::CartItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Derived totals for a cart.
///
/// Always computed from the current lines, never stored alongside them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of line quantities.
    pub total_items: i64,
    /// Sum of unit price times quantity.
    pub total_price: Money,
}

impl CartTotals {
    /// Compute totals for `items` priced in `currency`.
    pub fn from_items(items: &[CartItem], currency: Currency) -> Self {
        Self {
            line_count: items.len(),
            total_items: total_items(items),
            total_price: total_price(items, currency),
        }
    }

    /// Check if there is nothing to pay for.
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

pub(crate) fn total_items(items: &[CartItem]) -> i64 {
    items
        .iter()
        .fold(0_i64, |acc, item| acc.saturating_add(item.quantity))
}

pub(crate) fn total_price(items: &[CartItem], currency: Currency) -> Money {
    let amount = items.iter().fold(0_i64, |acc, item| {
        acc.saturating_add(item.line_total().amount_cents)
    });
    Money::new(amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductSnapshot;

    fn line(id: u64, cents: i64, quantity: i64) -> CartItem {
        let product = ProductSnapshot::new(id, "Piece", "", Money::new(cents, Currency::USD));
        CartItem::new(&product, quantity)
    }

    #[test]
    fn test_totals() {
        let items = [line(1, 1000, 2), line(2, 2000, 1)];
        let totals = CartTotals::from_items(&items, Currency::USD);

        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price, Money::new(4000, Currency::USD)); // 2*1000 + 1*2000
    }

    #[test]
    fn test_empty_totals() {
        let totals = CartTotals::from_items(&[], Currency::EUR);

        assert!(totals.is_empty());
        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.total_price, Money::zero(Currency::EUR));
    }

    #[test]
    fn test_free_preorder_contributes_no_price() {
        let product = ProductSnapshot::new(9u64, "Commission", "", Money::zero(Currency::USD));
        let items = [CartItem::preorder(&product, None), line(1, 500, 1)];
        let totals = CartTotals::from_items(&items, Currency::USD);

        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_price.amount_cents, 500);
    }
}
