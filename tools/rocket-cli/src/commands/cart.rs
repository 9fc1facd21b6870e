//! Cart commands.

use anyhow::{bail, Result};
use rocket_commerce::{CollectingNotifier, ProductId, UpdateProductAmount};

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::{CliCartStore, Context};
use crate::output::amount_badge;

/// List the cart contents.
pub async fn show(ctx: &Context) -> Result<()> {
    let (store, _) = ctx.open_store()?;
    ctx.output.header("Cart");
    ctx.output.cart(&store.cart());
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let (store, notifier) = ctx.open_store()?;
    store.add_product(args.product_id).await;

    check(&notifier)?;
    report_amount(&store, args.product_id, ctx);
    Ok(())
}

/// Remove a product.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let (store, notifier) = ctx.open_store()?;
    let was_present = store.cart().contains(args.product_id);
    store.remove_product(args.product_id);

    check(&notifier)?;
    if !was_present {
        let msg = format!("Product {} was not in the cart", args.product_id);
        ctx.output.warn(&msg);
    }
    finish(&store, &format!("Product {} removed", args.product_id), ctx);
    Ok(())
}

/// Set a product's quantity.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    if args.amount < 1 {
        let msg = format!("Ignoring quantity {}: must be at least 1", args.amount);
        ctx.output.warn(&msg);
    }

    let (store, notifier) = ctx.open_store()?;
    let update = UpdateProductAmount::new(args.product_id, args.amount);
    store.update_product_amount(update).await;

    check(&notifier)?;
    report_amount(&store, args.product_id, ctx);
    Ok(())
}

/// Priced lines and total.
pub async fn summary(ctx: &Context) -> Result<()> {
    let (store, _) = ctx.open_store()?;
    let summary = store.cart().summary(ctx.config.api.currency)?;

    ctx.output.header("Order summary");
    ctx.output.summary(&summary);
    Ok(())
}

/// Empty the cart.
pub async fn clear(ctx: &Context) -> Result<()> {
    let (store, notifier) = ctx.open_store()?;
    store.clear();

    check(&notifier)?;
    finish(&store, "Cart cleared", ctx);
    Ok(())
}

/// Fail with the shopper-facing message if the mutation was rejected.
fn check(notifier: &CollectingNotifier) -> Result<()> {
    if let Some(notification) = notifier.take().pop() {
        bail!("{}", notification.message());
    }
    Ok(())
}

fn report_amount(store: &CliCartStore, product_id: ProductId, ctx: &Context) {
    let badge = amount_badge(store.cart().amount_of(product_id));
    finish(store, &format!("Product {} in cart {}", product_id, badge), ctx);
}

fn finish(store: &CliCartStore, msg: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&store.cart());
        return;
    }
    ctx.output.success(msg);
}
