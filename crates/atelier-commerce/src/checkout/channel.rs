//! Order channels.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::info;

use crate::error::CommerceError;

/// Base of WhatsApp click-to-chat links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Somewhere an order message can be delivered.
pub trait OrderChannel {
    /// Deliver `message`.
    fn send(&self, message: &str) -> Result<(), CommerceError>;
}

/// Build a WhatsApp click-to-chat link carrying `message`.
///
/// Everything but digits is stripped from `phone`, so `+234 801-234 5678`
/// becomes `2348012345678`.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<String, CommerceError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(CommerceError::ValidationError(format!(
            "phone number {:?} has no digits",
            phone
        )));
    }

    Ok(format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        utf8_percent_encode(message, NON_ALPHANUMERIC)
    ))
}

/// Sends orders as WhatsApp links.
///
/// The channel only builds the link; `opener` decides what to do with it
/// (open a browser tab, print it, hand it to a webview).
pub struct WhatsAppChannel<F> {
    phone: String,
    opener: F,
}

impl<F> WhatsAppChannel<F>
where
    F: Fn(&str) -> Result<(), CommerceError>,
{
    pub fn new(phone: impl Into<String>, opener: F) -> Self {
        Self {
            phone: phone.into(),
            opener,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl<F> OrderChannel for WhatsAppChannel<F>
where
    F: Fn(&str) -> Result<(), CommerceError>,
{
    fn send(&self, message: &str) -> Result<(), CommerceError> {
        let link = whatsapp_link(&self.phone, message)?;
        info!(bytes = link.len(), "opening whatsapp order link");
        (self.opener)(&link)
    }
}

impl<F> std::fmt::Debug for WhatsAppChannel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppChannel")
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_link_encodes_message() {
        let link = whatsapp_link("+234 801-234 5678", "Hi there\nTotal: $20.00").unwrap();
        assert_eq!(
            link,
            "https://wa.me/2348012345678?text=Hi%20there%0ATotal%3A%20%2420%2E00"
        );
    }

    #[test]
    fn test_link_requires_digits() {
        assert!(matches!(
            whatsapp_link("call me", "hi"),
            Err(CommerceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_channel_passes_link_to_opener() {
        let opened = RefCell::new(None);
        let channel = WhatsAppChannel::new("15551234567", |link: &str| {
            *opened.borrow_mut() = Some(link.to_string());
            Ok(())
        });

        channel.send("order").unwrap();

        assert_eq!(
            opened.borrow().as_deref(),
            Some("https://wa.me/15551234567?text=order")
        );
    }

    #[test]
    fn test_channel_propagates_opener_error() {
        let channel = WhatsAppChannel::new("15551234567", |_: &str| {
            Err(CommerceError::ChannelError("no browser".into()))
        });

        assert!(matches!(
            channel.send("order"),
            Err(CommerceError::ChannelError(_))
        ));
    }
}
