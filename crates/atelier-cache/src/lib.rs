//! Type-safe key-value storage layer for the Atelier storefront.
//!
//! Provides a small, ergonomic API for persisting data in a key-value
//! backend with automatic JSON serialization. Two backends ship with the
//! crate: [`MemoryStore`] for ephemeral sessions and tests, and
//! [`FileStore`] which keeps one JSON file per key in a directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Cart {
//!     items: Vec<CartItem>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart:default", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("cart:default")?;
//!
//! // Delete a value
//! cache.delete("cart:default")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
