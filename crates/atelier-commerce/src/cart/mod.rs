//! Shopping cart module.
//!
//! Contains the cart line item, the persisted snapshot, the derived totals,
//! the persistence adapter and the [`CartStore`] that ties them together.

mod item;
mod persistence;
mod pricing;
mod snapshot;
mod store;

pub use item::CartItem;
pub use persistence::{CachePersistence, CartPersistence, MemoryPersistence, CART_KEY_PREFIX};
pub use pricing::CartTotals;
pub use snapshot::{CartSnapshot, SNAPSHOT_VERSION};
pub use store::CartStore;

/// Default maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;
