//! Search, category links, payment picker, chat, image preview, language menu,
//! and the suggested-price hints.

use aa_storefront::chat::{SENT_CLASS, compose_message, sent_message_html};
use aa_storefront::navigation::{category_url, search_url};
use aa_storefront::payment::SELECTED_CLASS;
use aa_storefront::pricing::{parse_price, suggested_price};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, FileReader, MouseEvent};

use crate::dom;
use crate::events::listen;
use crate::state::Ctx;

fn bind_search(ctx: &Ctx) -> Result<(), JsValue> {
    let Some(form) = &ctx.els.search_form else { return Ok(()) };
    let ctx = ctx.clone();
    listen(form, "submit", move |event: Event| {
        event.prevent_default();
        let query = ctx.els.search_input.as_ref().map(|i| i.value()).unwrap_or_default();
        if let Some(url) = search_url(&ctx.config, &query) {
            dom::navigate(&url);
        }
    })
}

fn bind_categories(ctx: &Ctx) -> Result<(), JsValue> {
    for link in &ctx.els.category_links {
        let ctx = ctx.clone();
        let category = link.get_attribute("data-category").unwrap_or_default();
        listen(link, "click", move |event: MouseEvent| {
            event.prevent_default();
            dom::navigate(&category_url(&ctx.config, &category));
        })?;
    }
    Ok(())
}

fn select_payment(ctx: &Ctx, chosen: &Element) {
    let method = chosen.get_attribute("data-method").unwrap_or_default();
    ctx.payment.borrow_mut().select(&method);

    let selection = ctx.payment.borrow();
    for el in &ctx.els.payment_methods {
        let is_chosen = el.get_attribute("data-method").is_some_and(|m| selection.is_selected(&m));
        dom::toggle_class(el, SELECTED_CLASS, is_chosen);
    }
    if let Some(input) = &ctx.els.selected_payment_method {
        input.set_value(&method);
    }
    if let Some(fields) = &ctx.els.card_fields {
        dom::show(fields, selection.card_fields_visible());
    }
}

fn bind_payment(ctx: &Ctx) -> Result<(), JsValue> {
    for method in &ctx.els.payment_methods {
        let ctx = ctx.clone();
        let chosen = method.clone();
        listen(method, "click", move |_: MouseEvent| select_payment(&ctx, &chosen))?;
    }
    Ok(())
}

fn send_chat(ctx: &Ctx) -> Result<(), JsValue> {
    let Some(input) = &ctx.els.message_input else { return Ok(()) };
    let Some(text) = compose_message(&input.value()) else { return Ok(()) };

    if let Some(list) = &ctx.els.chat_messages {
        let message = dom::document().create_element("div")?;
        message.set_class_name(SENT_CLASS);
        message.set_inner_html(&sent_message_html(&text));
        list.append_child(&message)?;
        list.set_scroll_top(list.scroll_height());
    }
    input.set_value("");
    Ok(())
}

fn bind_chat(ctx: &Ctx) -> Result<(), JsValue> {
    let Some(form) = &ctx.els.chat_form else { return Ok(()) };
    let ctx = ctx.clone();
    listen(form, "submit", move |event: Event| {
        event.prevent_default();
        if let Err(err) = send_chat(&ctx) {
            gloo_console::warn!(format!("chat append failed: {err:?}"));
        }
    })
}

fn preview_selected_image(ctx: &Ctx) -> Result<(), JsValue> {
    let (Some(input), Some(preview)) = (&ctx.els.product_image, &ctx.els.image_preview) else {
        return Ok(());
    };
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };

    let reader = FileReader::new()?;
    let loaded = reader.clone();
    let preview = preview.clone();
    listen(&reader, "load", move |_: Event| {
        if let Some(url) = loaded.result().ok().and_then(|r| r.as_string()) {
            preview.set_inner_html(&aa_storefront::templates::image_preview(&url));
        }
    })?;
    reader.read_as_data_url(&file)
}

fn bind_image_preview(ctx: &Ctx) -> Result<(), JsValue> {
    let Some(input) = &ctx.els.product_image else { return Ok(()) };
    let ctx = ctx.clone();
    listen(input, "change", move |_: Event| {
        if let Err(err) = preview_selected_image(&ctx) {
            gloo_console::warn!(format!("image preview failed: {err:?}"));
        }
    })
}

fn bind_language(ctx: &Ctx) -> Result<(), JsValue> {
    let (Some(button), Some(dropdown)) = (&ctx.els.language_btn, &ctx.els.language_dropdown) else {
        return Ok(());
    };
    let dropdown = dropdown.clone();
    listen(button, "click", move |_: MouseEvent| {
        let open = dom::is_displayed(&dropdown, "block");
        dom::show(&dropdown, !open);
    })
}

/// Log the suggested price of every product card that shows a price.
pub fn log_price_hints() {
    for card in dom::query_all(".product-card") {
        let Some(price) = card
            .query_selector(".product-price")
            .ok()
            .flatten()
            .and_then(|el| el.text_content())
            .and_then(|text| parse_price(&text))
        else {
            continue;
        };
        let title = card
            .query_selector(".product-title")
            .ok()
            .flatten()
            .and_then(|el| el.text_content())
            .unwrap_or_default();
        gloo_console::log!(format!(
            "suggested price for {}: {:.2}",
            title.trim(),
            suggested_price(price)
        ));
    }
}

pub fn bind(ctx: &Ctx) -> Result<(), JsValue> {
    bind_search(ctx)?;
    bind_categories(ctx)?;
    bind_payment(ctx)?;
    bind_chat(ctx)?;
    bind_image_preview(ctx)?;
    bind_language(ctx)?;
    Ok(())
}
