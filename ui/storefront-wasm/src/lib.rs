//! Ancient Artisans storefront WASM frontend.
//!
//! Binds the marketplace pages (login modal, cart, product tutorial, and the
//! smaller page widgets) to the flows in `aa-storefront`.

pub mod api;
pub mod dom;
pub mod events;
pub mod state;

pub mod auth;
pub mod cart;
pub mod lazy;
pub mod modal;
pub mod page;
pub mod tooltip;
pub mod tutorial;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let ctx = state::Ctx::new(els, state::read_config());

    events::bind_events(&ctx)?;
    tutorial::show_existing(&ctx);
    lazy::init(&ctx)?;
    page::log_price_hints();

    // Badges first: the count is painted from localStorage even when the
    // server is unreachable.
    cart::sync_count(&ctx).await;
    cart::reload(&ctx).await;

    Ok(())
}
