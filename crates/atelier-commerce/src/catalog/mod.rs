//! Catalog module.
//!
//! Contains the product types the storefront shows and the snapshot a cart
//! line is built from.

mod product;

pub use product::{Availability, Product, ProductSnapshot};
