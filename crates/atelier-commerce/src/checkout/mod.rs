//! Checkout module.
//!
//! Turns the cart into a human-readable order message, hands it to an
//! order channel (WhatsApp by default) and clears the cart once the
//! message went out.

mod channel;
mod summary;

pub use channel::{whatsapp_link, OrderChannel, WhatsAppChannel, WHATSAPP_BASE_URL};
pub use summary::{OrderLine, OrderSummary};

use tracing::info;

use crate::cart::{CartPersistence, CartStore};
use crate::error::CommerceError;

/// Send the cart as an order through `channel`, then clear it.
///
/// On a send failure the cart is left untouched so the customer can retry.
pub fn checkout<P, C>(
    store: &mut CartStore<P>,
    channel: &C,
    greeting: &str,
) -> Result<OrderSummary, CommerceError>
where
    P: CartPersistence,
    C: OrderChannel + ?Sized,
{
    let summary = OrderSummary::from_store(store)?;
    channel.send(&summary.render(greeting))?;

    info!(
        lines = summary.lines.len(),
        total_items = summary.total_items,
        total = %summary.total_price,
        "order sent, clearing cart"
    );
    store.clear();
    Ok(summary)
}
