//! Checkout command.

use std::cell::RefCell;

use anyhow::{bail, Result};
use atelier_commerce::checkout::{checkout, whatsapp_link, OrderSummary, WhatsAppChannel};
use serde_json::json;

use super::CheckoutArgs;
use crate::context::Context;

/// Build the WhatsApp order link, print it and clear the cart.
pub fn run(args: CheckoutArgs, ctx: &mut Context) -> Result<()> {
    let phone = args
        .phone
        .unwrap_or_else(|| ctx.config.checkout.phone.clone());
    if phone.trim().is_empty() {
        bail!("no WhatsApp number; set checkout.phone in the config or pass --phone");
    }

    let greeting = ctx.config.checkout.greeting.clone();
    let mut store = ctx.open_store()?;

    let (summary, link) = if args.dry_run {
        let summary = OrderSummary::from_store(&store)?;
        let link = whatsapp_link(&phone, &summary.render(&greeting))?;
        (summary, link)
    } else {
        let opened = RefCell::new(String::new());
        let channel = WhatsAppChannel::new(phone.as_str(), |link: &str| {
            *opened.borrow_mut() = link.to_string();
            Ok(())
        });
        let summary = checkout(&mut store, &channel, &greeting)?;
        drop(channel);
        (summary, opened.into_inner())
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "link": link,
            "summary": summary,
            "cleared": !args.dry_run,
        }));
        return Ok(());
    }

    ctx.output.header("Order");
    println!("{}", summary.render(&greeting));
    println!();
    ctx.output.kv("Link", &link);
    if args.dry_run {
        ctx.output.info("dry run; cart kept");
    } else {
        ctx.output.success("order link ready; cart cleared");
    }
    Ok(())
}
