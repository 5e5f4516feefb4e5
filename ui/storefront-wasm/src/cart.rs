//! Cart panel, add-to-cart buttons, and the count badges.

use aa_storefront::busy::Control;
use aa_storefront::cart::{self as flows, AddToCartOutcome, ProductRef};
use aa_storefront::modal::ModalId;
use aa_storefront::store::badge_visible;
use aa_storefront::templates::CART_REMOVE_CLASS;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::dom;
use crate::events::{listen, on_async};
use crate::modal;
use crate::state::Ctx;

/// A DOM element driven as a busy-able trigger.
pub struct ButtonControl<'a>(pub &'a HtmlElement);

impl Control for ButtonControl<'_> {
    fn label(&self) -> String {
        self.0.inner_html()
    }

    fn set_label(&self, label: &str) {
        self.0.set_inner_html(label);
    }

    fn set_disabled(&self, disabled: bool) {
        let result = if disabled {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
        if let Err(err) = result {
            gloo_console::warn!(format!("cannot toggle disabled: {err:?}"));
        }
    }
}

fn render(ctx: &Ctx) {
    if let Some(panel) = &ctx.els.cart_content {
        panel.set_inner_html(&ctx.cart.borrow().view().to_html());
    }
}

/// Reload the cart list into `#cartContent`.
pub async fn reload(ctx: &Ctx) {
    let Some(user_id) = ctx.user_id() else { return };
    if ctx.els.cart_content.is_none() {
        return;
    }

    ctx.cart.borrow_mut().begin_load();
    render(ctx);
    let result = flows::fetch_cart(&*ctx.transport, &ctx.config, &user_id).await;
    ctx.cart.borrow_mut().finish_load(result);
    render(ctx);
}

async fn add_clicked(ctx: &Ctx, button: &HtmlElement) {
    let product = ProductRef {
        product_id: dom::data(button, "product-id"),
        product_name: dom::data(button, "product-name"),
    };

    let control = ButtonControl(button);
    let outcome = flows::add_to_cart(&*ctx.transport, &ctx.config, &ctx.cart_count, &control, &product).await;
    if outcome == AddToCartOutcome::LoginRequired {
        modal::open(ctx, ModalId::Login);
    }
    dom::alert(&outcome.notice());
}

async fn remove_clicked(ctx: &Ctx, event: Event) {
    let Some(control) = dom::closest_target(&event, &format!(".{CART_REMOVE_CLASS}")) else {
        return;
    };
    let Some(cart_item_id) = dom::data(&control, "cart-item-id").and_then(|id| id.parse::<i64>().ok()) else {
        gloo_console::warn!("remove control without a cart item id");
        return;
    };

    match flows::remove_item(&*ctx.transport, &ctx.config, cart_item_id).await {
        Ok(()) => reload(ctx).await,
        Err(err) => {
            gloo_console::error!(format!("error removing item: {err}"));
            dom::alert(&flows::remove_failure_notice(&err));
        }
    }
}

fn paint_badges(badges: &[HtmlElement], count: i64) {
    for badge in badges {
        badge.set_text_content(Some(&count.to_string()));
        dom::set_display(badge, if badge_visible(count) { "inline" } else { "none" });
    }
}

/// Subscribe the `.cart-count` badges and adopt the server count once.
pub async fn sync_count(ctx: &Ctx) {
    let badges = ctx.els.cart_counts.clone();
    ctx.cart_count.subscribe(move |count| paint_badges(&badges, count));

    let user_id = ctx.user_id();
    flows::sync_cart_count(&*ctx.transport, &ctx.config, &ctx.cart_count, user_id.as_deref()).await;
}

pub fn bind(ctx: &Ctx) -> Result<(), JsValue> {
    for button in &ctx.els.add_to_cart_btns {
        let ctx = ctx.clone();
        let target = button.clone();
        listen(button, "click", move |_: MouseEvent| {
            let ctx = ctx.clone();
            let button = target.clone();
            wasm_bindgen_futures::spawn_local(async move {
                add_clicked(&ctx, &button).await;
            });
        })?;
    }
    // Rows are re-rendered on every load, so removal is delegated to the panel.
    if let Some(panel) = &ctx.els.cart_content {
        on_async!(panel, "click", ctx, remove_clicked)?;
    }
    Ok(())
}
