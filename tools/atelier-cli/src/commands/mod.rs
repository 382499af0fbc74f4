//! CLI command implementations.

pub mod cart;
pub mod checkout;

use clap::Args;

/// Product details shared by the add commands.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: u64,

    /// Product title.
    #[arg(short, long)]
    pub title: String,

    /// Unit price in major units, e.g. 12.50.
    #[arg(short, long, default_value_t = 0.0)]
    pub price: f64,

    /// Product image URL.
    #[arg(short, long, default_value = "")]
    pub image: String,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub product: ProductArgs,

    /// Number of units to add.
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the preorder command.
#[derive(Args)]
pub struct PreorderArgs {
    #[command(flatten)]
    pub product: ProductArgs,

    /// Note for the gallery.
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product id.
    pub id: u64,

    /// New quantity; zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product id.
    pub id: u64,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// WhatsApp number, overriding the configured one.
    #[arg(long)]
    pub phone: Option<String>,

    /// Print the order link without clearing the cart.
    #[arg(long)]
    pub dry_run: bool,
}
