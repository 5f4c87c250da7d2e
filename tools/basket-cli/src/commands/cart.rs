//! Cart commands.

use anyhow::{Context as _, Result};
use basket_core::{Cart, ProductId, ProductRef};

use super::{AddArgs, ItemArgs};
use crate::context::Context;
use crate::output::format_price;

/// Print the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let carts = ctx.open_cart().await?;
    render(&carts.snapshot(), ctx);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let carts = ctx.open_cart().await?;
    let product = ProductRef::new(args.id, args.title, args.image_url, args.price);
    let id = product.id.clone();

    carts
        .add_to_cart(product)
        .await
        .with_context(|| format!("Failed to add {}", id))?;

    ctx.output.success(&format!("Added {}", id));
    render(&carts.snapshot(), ctx);
    Ok(())
}

/// Add one unit of a product already in the cart.
pub async fn increment(args: ItemArgs, ctx: &Context) -> Result<()> {
    let carts = ctx.open_cart().await?;
    let id = ProductId::new(args.id);

    if !carts.snapshot().contains(&id) {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    carts
        .increment(&id)
        .await
        .with_context(|| format!("Failed to increment {}", id))?;

    render(&carts.snapshot(), ctx);
    Ok(())
}

/// Remove one unit of a product.
pub async fn decrement(args: ItemArgs, ctx: &Context) -> Result<()> {
    let carts = ctx.open_cart().await?;
    let id = ProductId::new(args.id);

    match carts.snapshot().quantity_of(&id) {
        None => ctx.output.warn(&format!("{} is not in the cart", id)),
        Some(1) => ctx.output.info(&format!("Removing {}", id)),
        Some(_) => {}
    }
    carts
        .decrement(&id)
        .await
        .with_context(|| format!("Failed to decrement {}", id))?;

    render(&carts.snapshot(), ctx);
    Ok(())
}

fn render(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "itemCount": cart.item_count(),
        }));
        return;
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let rows: Vec<[String; 4]> = cart
        .iter()
        .map(|item| {
            [
                item.id.to_string(),
                item.title.clone(),
                format_price(item.price),
                item.quantity().to_string(),
            ]
        })
        .collect();

    let header = ["ID", "TITLE", "PRICE", "QTY"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, col) in widths.iter_mut().zip(row) {
            *width = (*width).max(col.chars().count());
        }
    }

    ctx.output.table_row(&header, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }

    ctx.output.kv("products", &cart.len().to_string());
    ctx.output.kv("items", &cart.item_count().to_string());
}
