//! The cart store: the storefront's single mutation surface for the cart.

use tracing::{debug, info, warn};

use crate::cart::pricing::{total_items, total_price};
use crate::cart::{CartItem, CartPersistence, CartSnapshot, CartTotals};
use crate::catalog::ProductSnapshot;
use crate::config::CartConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Owns the cart lines and keeps them in sync with persistence.
///
/// Construct one per application with [`CartStore::initialize`] and pass
/// it to whatever needs the cart. Every successful mutation is written
/// through to the persistence adapter; a failed write is logged and the
/// in-memory cart stays authoritative for the session.
///
/// Two stores sharing one storage backend do not coordinate: the last
/// write wins.
#[derive(Debug)]
pub struct CartStore<P> {
    items: Vec<CartItem>,
    currency: Currency,
    max_quantity_per_item: i64,
    persistence: P,
}

impl<P: CartPersistence> CartStore<P> {
    /// Create the store and hydrate it from `persistence`.
    ///
    /// A missing, unreadable or invalid snapshot yields an empty cart.
    pub fn initialize(persistence: P, config: &CartConfig) -> Self {
        let mut store = Self {
            items: Vec::new(),
            currency: config.currency,
            max_quantity_per_item: config.max_quantity_per_item.max(1),
            persistence,
        };
        store.items = store.hydrate();
        store
    }

    fn hydrate(&self) -> Vec<CartItem> {
        let mut snapshot = match self.persistence.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("no saved cart, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "failed to load saved cart, starting empty");
                return Vec::new();
            }
        };

        for item in &mut snapshot.items {
            item.normalize_message();
        }

        if let Err(e) = snapshot.validate(self.currency, self.max_quantity_per_item) {
            warn!(error = %e, "discarding invalid saved cart");
            return Vec::new();
        }

        if !snapshot.items.is_empty() {
            info!(
                lines = snapshot.items.len(),
                total_items = total_items(&snapshot.items),
                "restored saved cart"
            );
        }
        snapshot.items
    }

    /// Add one unit of a product.
    pub fn add_one(&mut self, product: &ProductSnapshot) -> Result<&CartItem, CommerceError> {
        self.add_item(product, 1)
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing in-stock line for the same product accumulates; an
    /// existing preorder line is returned unchanged.
    ///
    /// Returns an error, leaving the cart untouched, if:
    /// - Quantity is not positive
    /// - The product is priced in another currency
    /// - The line would exceed the per-item limit
    pub fn add_item(
        &mut self,
        product: &ProductSnapshot,
        quantity: i64,
    ) -> Result<&CartItem, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        self.check_currency(&product.price)?;

        let index = match self.position(product.id) {
            Some(index) if self.items[index].is_preorder => {
                debug!(product_id = %product.id, "preorder line does not accumulate");
                return Ok(&self.items[index]);
            }
            Some(index) => {
                let existing = &mut self.items[index];
                let new_quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;

                if new_quantity > self.max_quantity_per_item {
                    return Err(CommerceError::QuantityExceedsLimit(
                        new_quantity,
                        self.max_quantity_per_item,
                    ));
                }

                existing.quantity = new_quantity;
                index
            }
            None => {
                if quantity > self.max_quantity_per_item {
                    return Err(CommerceError::QuantityExceedsLimit(
                        quantity,
                        self.max_quantity_per_item,
                    ));
                }

                self.items.push(CartItem::new(product, quantity));
                self.items.len() - 1
            }
        };

        debug!(product_id = %product.id, quantity, "added to cart");
        self.persist();
        Ok(&self.items[index])
    }

    /// Add a product as a preorder line with an optional note.
    ///
    /// Preorder lines always hold one unit. Calling this again for the same
    /// product replaces the note; calling it for a product already in the
    /// cart as an in-stock line turns that line into a preorder.
    pub fn add_preorder_item(
        &mut self,
        product: &ProductSnapshot,
        message: Option<&str>,
    ) -> Result<&CartItem, CommerceError> {
        self.check_currency(&product.price)?;

        let index = match self.position(product.id) {
            Some(index) => {
                let existing = &mut self.items[index];
                if !existing.is_preorder {
                    debug!(product_id = %product.id, "converting line to preorder");
                }
                existing.mark_preorder(message);
                index
            }
            None => {
                self.items.push(CartItem::preorder(product, message));
                self.items.len() - 1
            }
        };

        debug!(product_id = %product.id, "added preorder to cart");
        self.persist();
        Ok(&self.items[index])
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Preorder lines stay at a
    /// single unit. Returns whether the cart changed; an unknown product is
    /// a no-op.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let max = self.max_quantity_per_item;
        let Some(item) = self.items.iter_mut().find(|i| i.id == product_id) else {
            return Ok(false);
        };

        if item.is_preorder || item.quantity == quantity {
            return Ok(false);
        }

        if quantity > max {
            return Err(CommerceError::QuantityExceedsLimit(quantity, max));
        }

        item.quantity = quantity;
        debug!(product_id = %product_id, quantity, "updated cart quantity");
        self.persist();
        Ok(true)
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(product_id = %product_id, "removed from cart");
            self.persist();
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cleared cart");
        self.persist();
    }

    /// Check if a product has a line, preorder or not.
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Get the line for a product.
    pub fn get_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Lines in the order they were added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        total_items(&self.items)
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total_price(&self) -> Money {
        total_price(&self.items, self.currency)
    }

    /// Line count, item count and price in one value.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.items, self.currency)
    }

    /// Current state in its persisted form.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.currency, self.items.clone())
    }

    /// Borrow the persistence adapter.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.id == product_id)
    }

    fn check_currency(&self, price: &Money) -> Result<(), CommerceError> {
        if price.currency == self.currency {
            Ok(())
        } else {
            Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: price.currency.code().to_string(),
            })
        }
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.snapshot()) {
            warn!(
                error = %e,
                lines = self.items.len(),
                "failed to save cart, keeping in-memory state"
            );
        }
    }
}
