//! Cart, catalog snapshots and checkout for the Atelier gallery storefront.
//!
//! - **Catalog**: products and the snapshot a cart line is built from
//! - **Cart**: the [`CartStore`](cart::CartStore), its line items, totals
//!   and persistence adapters
//! - **Checkout**: order summary rendering and the WhatsApp order channel
//! - **Config**: currency, storage backend and checkout settings
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_commerce::prelude::*;
//!
//! let config = CartConfig::load("atelier.toml")?;
//! let mut cart = config.open_store()?;
//!
//! cart.add_item(&product.snapshot(), 2)?;
//! cart.add_preorder_item(&commission.snapshot(), Some("A3, unframed"))?;
//!
//! println!("{} items, {}", cart.total_items(), cart.total_price());
//!
//! let channel = WhatsAppChannel::new(&config.checkout.phone, open_in_browser);
//! checkout(&mut cart, &channel, &config.checkout.greeting)?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Availability, Product, ProductSnapshot};

    // Cart
    pub use crate::cart::{
        CachePersistence, CartItem, CartPersistence, CartSnapshot, CartStore, CartTotals,
        MemoryPersistence,
    };

    // Checkout
    pub use crate::checkout::{checkout, OrderChannel, OrderLine, OrderSummary, WhatsAppChannel};

    // Config
    pub use crate::config::{CartConfig, CheckoutConfig, ConfigError, StorageConfig};
}
