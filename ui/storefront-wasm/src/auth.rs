//! Login form submission and email-based tab detection.

use aa_storefront::auth::{self as flows, Credentials, LoginOutcome};
use aa_storefront::modal::{AuthTab, LoginFields};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FormData, HtmlFormElement, HtmlInputElement};

use crate::dom;
use crate::events::{on_async, on_submit_async};
use crate::modal;
use crate::state::Ctx;

fn form_value(data: &FormData, name: &str) -> String {
    data.get(name).as_string().unwrap_or_default()
}

fn read_fields(form: &HtmlFormElement) -> Result<LoginFields, JsValue> {
    let data = FormData::new_with_form(form)?;
    Ok(LoginFields {
        email: form_value(&data, "email"),
        password: form_value(&data, "password"),
        verification_code: form_value(&data, "verification_code"),
    })
}

async fn submit(ctx: &Ctx, tab: AuthTab) {
    let form = match tab {
        AuthTab::Buyer => ctx.els.buyer_form.as_ref(),
        AuthTab::Seller => ctx.els.seller_form.as_ref(),
    };
    let Some(form) = form else { return };

    let fields = match read_fields(form) {
        Ok(fields) => fields,
        Err(err) => {
            gloo_console::error!(format!("cannot read login form: {err:?}"));
            return;
        }
    };
    let credentials = Credentials::from_fields(tab.role(), &fields);

    match flows::submit_login(&*ctx.transport, &ctx.config, tab.role(), credentials).await {
        LoginOutcome::Redirect(url) => dom::navigate(&url),
        LoginOutcome::Rejected(message) => {
            ctx.login.borrow_mut().show_error(message);
            modal::render_login(ctx);
        }
    }
}

async fn submit_buyer(ctx: &Ctx) {
    submit(ctx, AuthTab::Buyer).await;
}

async fn submit_seller(ctx: &Ctx) {
    submit(ctx, AuthTab::Seller).await;
}

async fn detect_on_blur(ctx: &Ctx, event: Event) {
    let Some(input) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let email = input.value();
    if let Some(role) = flows::detect_user_type(&*ctx.transport, &ctx.config, &email).await {
        modal::switch_tab(ctx, AuthTab::from(role));
    }
}

pub fn bind(ctx: &Ctx) -> Result<(), JsValue> {
    if let Some(form) = &ctx.els.buyer_form {
        on_submit_async!(form, ctx, submit_buyer)?;
    }
    if let Some(form) = &ctx.els.seller_form {
        on_submit_async!(form, ctx, submit_seller)?;
    }
    for input in &ctx.els.email_inputs {
        on_async!(input, "blur", ctx, detect_on_blur)?;
    }
    Ok(())
}
