//! Event binding.
//!
//! `listen` attaches a Rust closure as a DOM listener for the life of the
//! page. Async handlers are spawned with `wasm_bindgen_futures::spawn_local`
//! through the `on_async!` and `on_submit_async!` macros.

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::state::Ctx;
use crate::{auth, cart, modal, page, tooltip, tutorial};

/// Helper: attach an async handler that receives the context and the event.
macro_rules! on_async {
    ($target:expr, $event:expr, $ctx:expr, $handler:expr) => {{
        let ctx = $ctx.clone();
        $crate::events::listen($target, $event, move |event: web_sys::Event| {
            let ctx = ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&ctx, event).await;
            });
        })
    }};
}

/// Helper: async form submission. Default navigation is cancelled before the
/// handler is spawned, since spawned futures run after dispatch returns.
macro_rules! on_submit_async {
    ($form:expr, $ctx:expr, $handler:expr) => {{
        let ctx = $ctx.clone();
        $crate::events::listen($form, "submit", move |event: web_sys::Event| {
            event.prevent_default();
            let ctx = ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&ctx).await;
            });
        })
    }};
}

pub(crate) use {on_async, on_submit_async};

/// Attach `handler` to `target` for `event`. Listeners live as long as the
/// page, so the closure is never dropped.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(ctx: &Ctx) -> Result<(), JsValue> {
    modal::bind(ctx)?;
    auth::bind(ctx)?;
    cart::bind(ctx)?;
    tutorial::bind(ctx)?;
    tooltip::bind(ctx)?;
    page::bind(ctx)?;
    Ok(())
}
