//! Cart editing commands.

use anyhow::Result;
use atelier_commerce::catalog::ProductSnapshot;
use atelier_commerce::money::{Currency, Money};
use atelier_commerce::ProductId;
use serde_json::json;

use super::{AddArgs, PreorderArgs, ProductArgs, RemoveArgs, SetArgs};
use crate::context::{CliStore, Context};
use crate::output::{line_badge, Output};

const WIDTHS: [usize; 5] = [8, 28, 6, 12, 10];

/// Show the cart.
pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    print_cart(&ctx.output, &store);
    Ok(())
}

/// Add an in-stock piece.
pub fn add(args: AddArgs, ctx: &mut Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let product = snapshot(&args.product, store.currency());

    let item = store.add_item(&product, args.quantity)?;
    if item.is_preorder {
        ctx.output.warn(&format!(
            "'{}' is already in the cart as a preorder; quantity unchanged",
            item.title
        ));
    } else {
        ctx.output
            .success(&format!("'{}' now x{} in cart", item.title, item.quantity));
    }

    print_cart(&ctx.output, &store);
    Ok(())
}

/// Add a piece as a preorder.
pub fn preorder(args: PreorderArgs, ctx: &mut Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let product = snapshot(&args.product, store.currency());

    let item = store.add_preorder_item(&product, args.message.as_deref())?;
    ctx.output
        .success(&format!("'{}' added as a preorder", item.title));

    print_cart(&ctx.output, &store);
    Ok(())
}

/// Change a line's quantity.
pub fn set(args: SetArgs, ctx: &mut Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    if store.update_quantity(id, args.quantity)? {
        ctx.output.success(&format!("updated product {}", id));
    } else {
        ctx.output.info(&format!("product {} unchanged", id));
    }

    print_cart(&ctx.output, &store);
    Ok(())
}

/// Remove a line.
pub fn remove(args: RemoveArgs, ctx: &mut Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    if store.remove_item(id) {
        ctx.output.success(&format!("removed product {}", id));
    } else {
        ctx.output.info(&format!("product {} was not in the cart", id));
    }

    print_cart(&ctx.output, &store);
    Ok(())
}

/// Empty the cart.
pub fn clear(ctx: &mut Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.clear();
    ctx.output.success("cart cleared");

    if ctx.output.is_json() {
        ctx.output.json(&store.totals());
    }
    Ok(())
}

fn snapshot(args: &ProductArgs, currency: Currency) -> ProductSnapshot {
    ProductSnapshot::new(
        args.id,
        args.title.as_str(),
        args.image.as_str(),
        Money::from_decimal(args.price, currency),
    )
}

fn print_cart(output: &Output, store: &CliStore) {
    if output.is_json() {
        output.json(&json!({
            "cart": store.snapshot(),
            "totals": store.totals(),
        }));
        return;
    }

    output.header("Cart");
    if store.is_empty() {
        output.info("cart is empty");
        return;
    }

    output.table_row(&["ID", "TITLE", "QTY", "TOTAL", "STATUS"], &WIDTHS);
    for item in store.items() {
        let id = item.id.to_string();
        let qty = item.quantity.to_string();
        let total = item.line_total().to_string();
        let badge = line_badge(item);
        output.table_row(&[&id, &item.title, &qty, &total, &badge], &WIDTHS);
        if let Some(note) = &item.preorder_message {
            output.kv("note", note);
        }
    }

    println!();
    output.kv("Items", &store.total_items().to_string());
    output.kv("Total", &store.total_price().to_string());
}
