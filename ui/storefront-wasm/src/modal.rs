//! Overlay panels and the login panel's DOM.

use aa_storefront::modal::{AuthTab, ModalId};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::dom;
use crate::events::listen;
use crate::state::Ctx;

fn panel(id: ModalId) -> Option<HtmlElement> {
    dom::by_id_typed(id.element_id())
}

pub fn open(ctx: &Ctx, id: ModalId) {
    ctx.modals.borrow_mut().open(id);
    if id == ModalId::Login {
        ctx.login.borrow_mut().open();
        for form in [&ctx.els.buyer_form, &ctx.els.seller_form].into_iter().flatten() {
            form.reset();
        }
        render_login(ctx);
    }
    if let Some(el) = panel(id) {
        dom::set_display(&el, "flex");
    }
}

pub fn close(ctx: &Ctx, id: ModalId) {
    ctx.modals.borrow_mut().close(id);
    if let Some(el) = panel(id) {
        dom::set_display(&el, "none");
    }
}

pub fn switch_tab(ctx: &Ctx, tab: AuthTab) {
    ctx.login.borrow_mut().switch_tab(tab);
    render_login(ctx);
}

/// Paint tabs, forms, and the error banner from the login panel state.
pub fn render_login(ctx: &Ctx) {
    let login = ctx.login.borrow();
    let active = login.tab().data_tab();
    for tab in &ctx.els.tabs {
        dom::toggle_class(tab, "active", tab.get_attribute("data-tab").as_deref() == Some(active));
    }

    let (buyer_visible, seller_visible) = login.form_visibility();
    if let Some(form) = &ctx.els.buyer_form {
        dom::show(form, buyer_visible);
    }
    if let Some(form) = &ctx.els.seller_form {
        dom::show(form, seller_visible);
    }

    if let Some(banner) = &ctx.els.login_error {
        match login.error() {
            Some(message) => {
                banner.set_text_content(Some(message));
                dom::show(banner, true);
            }
            None => dom::show(banner, false),
        }
    }
}

fn bind_trigger(ctx: &Ctx, el: &Element, attr: &str, opening: bool) -> Result<(), JsValue> {
    let Some(id) = el.get_attribute(attr).as_deref().and_then(ModalId::parse) else {
        gloo_console::warn!(format!("unknown modal in {attr}"));
        return Ok(());
    };
    let ctx = ctx.clone();
    listen(el, "click", move |event: MouseEvent| {
        event.prevent_default();
        if opening {
            open(&ctx, id);
        } else {
            close(&ctx, id);
        }
    })
}

pub fn bind(ctx: &Ctx) -> Result<(), JsValue> {
    for el in &ctx.els.modal_openers {
        bind_trigger(ctx, el, "data-open-modal", true)?;
    }
    for el in &ctx.els.modal_closers {
        bind_trigger(ctx, el, "data-close-modal", false)?;
    }

    for tab in &ctx.els.tabs {
        let target = match tab.get_attribute("data-tab").as_deref() {
            Some("seller") => AuthTab::Seller,
            _ => AuthTab::Buyer,
        };
        let ctx = ctx.clone();
        listen(tab, "click", move |_: MouseEvent| switch_tab(&ctx, target))?;
    }

    // Backdrop clicks: the event target is the panel element itself.
    let backdrop_ctx = ctx.clone();
    listen(&dom::window(), "click", move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let closed = backdrop_ctx.modals.borrow_mut().close_on_backdrop(&target.id());
        if let Some(id) = closed {
            if let Some(el) = panel(id) {
                dom::set_display(&el, "none");
            }
        }
    })?;

    render_login(ctx);
    Ok(())
}
