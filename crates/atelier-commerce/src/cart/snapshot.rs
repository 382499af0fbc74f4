//! Persisted form of the cart.

use std::collections::HashSet;

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The cart as written to and read from storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    /// Schema version.
    pub version: u32,
    /// Currency every line is priced in.
    pub currency: Currency,
    /// Lines in display order.
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Snapshot of the given lines at the current schema version.
    pub fn new(currency: Currency, items: Vec<CartItem>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            currency,
            items,
        }
    }

    /// Empty snapshot.
    pub fn empty(currency: Currency) -> Self {
        Self::new(currency, Vec::new())
    }

    /// Check the cart invariants against a loaded snapshot.
    ///
    /// Storage is outside the store's control, so a snapshot can carry
    /// anything: an old schema, another currency, duplicate lines or
    /// quantities no mutation could have produced.
    pub fn validate(&self, currency: Currency, max_quantity: i64) -> Result<(), CommerceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CommerceError::ValidationError(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }

        if self.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: self.currency.code().to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(CommerceError::ValidationError(format!(
                    "duplicate line for product {}",
                    item.id
                )));
            }
            if item.price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: item.price.currency.code().to_string(),
                });
            }
            if item.quantity < 1 {
                return Err(CommerceError::InvalidQuantity(item.quantity));
            }
            if item.quantity > max_quantity {
                return Err(CommerceError::QuantityExceedsLimit(item.quantity, max_quantity));
            }
            if item.is_preorder && item.quantity != 1 {
                return Err(CommerceError::ValidationError(format!(
                    "preorder line for product {} has quantity {}",
                    item.id, item.quantity
                )));
            }
            if !item.is_preorder && item.preorder_message.is_some() {
                return Err(CommerceError::ValidationError(format!(
                    "in-stock line for product {} carries a preorder message",
                    item.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductSnapshot;
    use crate::money::Money;

    fn line(id: u64, quantity: i64) -> CartItem {
        let product = ProductSnapshot::new(id, "Print", "", Money::new(2500, Currency::USD));
        CartItem::new(&product, quantity)
    }

    #[test]
    fn test_valid_snapshot() {
        let snap = CartSnapshot::new(Currency::USD, vec![line(1, 2), line(2, 1)]);
        assert!(snap.validate(Currency::USD, 10).is_ok());
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        assert!(CartSnapshot::empty(Currency::EUR).validate(Currency::EUR, 1).is_ok());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut snap = CartSnapshot::empty(Currency::USD);
        snap.version = 99;
        assert!(matches!(
            snap.validate(Currency::USD, 10),
            Err(CommerceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_other_currency() {
        let snap = CartSnapshot::empty(Currency::GBP);
        assert!(matches!(
            snap.validate(Currency::USD, 10),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let snap = CartSnapshot::new(Currency::USD, vec![line(1, 1), line(1, 2)]);
        assert!(snap.validate(Currency::USD, 10).is_err());
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let snap = CartSnapshot::new(Currency::USD, vec![line(1, 0)]);
        assert!(matches!(
            snap.validate(Currency::USD, 10),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_rejects_quantity_over_limit() {
        let snap = CartSnapshot::new(Currency::USD, vec![line(1, 11)]);
        assert!(matches!(
            snap.validate(Currency::USD, 10),
            Err(CommerceError::QuantityExceedsLimit(11, 10))
        ));
    }

    #[test]
    fn test_rejects_multi_unit_preorder() {
        let mut item = line(1, 1);
        item.is_preorder = true;
        item.quantity = 3;
        let snap = CartSnapshot::new(Currency::USD, vec![item]);
        assert!(snap.validate(Currency::USD, 10).is_err());
    }
}
