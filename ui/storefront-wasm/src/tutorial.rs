//! Tutorial generation, reveal, and sharing on the product page.

use aa_storefront::TutorialMode;
use aa_storefront::modal::ModalId;
use aa_storefront::templates::{self, TUTORIAL_VIEW_CLASS};
use aa_storefront::tutorial::{
    self as flows, GENERATION_FAILED, RemoteTutorialSource, SHARED, SimulatedTutorialSource, Timer,
    TutorialSource,
};
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, ScrollBehavior, ScrollIntoViewOptions};

use crate::cart::ButtonControl;
use crate::dom;
use crate::events::on_async;
use crate::modal;
use crate::state::Ctx;

pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

/// Today's date in the visitor's locale.
fn today() -> String {
    let locale = dom::window().navigator().language().unwrap_or_else(|| "en-US".to_string());
    js_sys::Date::new_0()
        .to_locale_date_string(&locale, &JsValue::UNDEFINED)
        .into()
}

/// Show the container when the page was rendered with an existing tutorial.
pub fn show_existing(ctx: &Ctx) {
    let (Some(product), Some(container)) = (&ctx.product, &ctx.els.tutorial_container) else {
        return;
    };
    if ctx.tutorial.borrow().show_on_load(product) {
        dom::show(container, true);
    }
}

async fn generate_clicked(ctx: &Ctx, _event: Event) {
    let (Some(product), Some(button)) = (&ctx.product, &ctx.els.generate_tutorial_btn) else {
        return;
    };

    let timer = BrowserTimer;
    let simulated;
    let remote;
    let source: &dyn TutorialSource = match ctx.config.tutorial_mode {
        TutorialMode::Simulated => {
            simulated = SimulatedTutorialSource::new(&timer, ctx.config.tutorial_delay_ms, today());
            &simulated
        }
        TutorialMode::Remote => {
            remote = RemoteTutorialSource::new(&*ctx.transport, &ctx.config);
            &remote
        }
    };

    let control = ButtonControl(button);
    match flows::generate_tutorial(source, product, &control).await {
        Ok(tutorial) => {
            if let Some(container) = &ctx.els.tutorial_container {
                container.set_inner_html(&templates::tutorial_ready());
                dom::show(container, true);
            }
            if let Some(content) = &ctx.els.tutorial_content {
                content.set_inner_html(&templates::tutorial_content(&tutorial));
                dom::show(content, false);
            }
            ctx.tutorial.borrow_mut().set_generated(tutorial);
        }
        Err(err) => {
            gloo_console::error!(format!("tutorial generation failed: {err}"));
            if err.is_unauthorized() {
                modal::open(ctx, ModalId::Login);
            }
            dom::alert(&err.user_message(GENERATION_FAILED));
        }
    }
}

fn view_clicked(ctx: &Ctx, event: &Event) {
    if dom::closest_target(event, &format!(".{TUTORIAL_VIEW_CLASS}")).is_none() {
        return;
    }
    let Some(content) = &ctx.els.tutorial_content else { return };
    if !ctx.tutorial.borrow_mut().reveal() {
        return;
    }
    dom::show(content, true);
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    content.scroll_into_view_with_scroll_into_view_options(&options);
}

async fn share_clicked(ctx: &Ctx, _event: Event) {
    let text = match flows::share_text(ctx.tutorial.borrow().current()) {
        Ok(text) => text,
        Err(err) => {
            dom::alert(&err.user_message(flows::NOTHING_TO_SHARE));
            return;
        }
    };
    let clipboard = dom::window().navigator().clipboard();
    match JsFuture::from(clipboard.write_text(&text)).await {
        Ok(_) => dom::alert(SHARED),
        Err(err) => gloo_console::warn!(format!("clipboard write failed: {err:?}")),
    }
}

pub fn bind(ctx: &Ctx) -> Result<(), JsValue> {
    if let Some(button) = &ctx.els.generate_tutorial_btn {
        on_async!(button, "click", ctx, generate_clicked)?;
    }
    if let Some(button) = &ctx.els.share_tutorial_btn {
        on_async!(button, "click", ctx, share_clicked)?;
    }
    // The teaser card is replaced on every generation; its button is delegated.
    if let Some(container) = &ctx.els.tutorial_container {
        let ctx = ctx.clone();
        crate::events::listen(container, "click", move |event: Event| view_clicked(&ctx, &event))?;
    }
    Ok(())
}
