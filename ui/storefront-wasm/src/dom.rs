//! DOM element bindings.
//!
//! Every storefront page carries a different subset of the widgets, so each
//! binding is optional and the handlers skip what the page does not have.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nl) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_typed<T: JsCast>(selector: &str) -> Vec<T> {
    query_all(selector)
        .into_iter()
        .filter_map(|e| e.dyn_into::<T>().ok())
        .collect()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_display(el: &HtmlElement, value: &str) {
    let _ = el.style().set_property("display", value);
}

pub fn is_displayed(el: &HtmlElement, value: &str) -> bool {
    el.style().get_property_value("display").ok().as_deref() == Some(value)
}

pub fn show(el: &HtmlElement, visible: bool) {
    set_display(el, if visible { "block" } else { "none" });
}

pub fn data(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{name}"))
        .filter(|v| !v.is_empty())
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest_target(event: &web_sys::Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()?
}

pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

pub fn navigate(url: &str) {
    if let Err(err) = window().location().set_href(url) {
        gloo_console::error!(format!("navigation to {url} failed: {err:?}"));
    }
}

/// Text of an embedded `<script type="application/json">` block.
pub fn json_script(id: &str) -> Option<String> {
    by_id(id).and_then(|el| el.text_content())
}

// ── Elements struct ──

/// Storefront widgets present on the current page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Login
    pub buyer_form: Option<HtmlFormElement>,
    pub seller_form: Option<HtmlFormElement>,
    pub login_error: Option<HtmlElement>,
    pub tabs: Vec<Element>,
    pub email_inputs: Vec<HtmlInputElement>,
    pub modal_openers: Vec<Element>,
    pub modal_closers: Vec<Element>,

    // Cart
    pub cart_content: Option<HtmlElement>,
    pub add_to_cart_btns: Vec<HtmlElement>,
    pub cart_counts: Vec<HtmlElement>,

    // Tutorial
    pub tutorial_container: Option<HtmlElement>,
    pub tutorial_content: Option<HtmlElement>,
    pub generate_tutorial_btn: Option<HtmlElement>,
    pub share_tutorial_btn: Option<HtmlElement>,

    // Page extras
    pub search_form: Option<HtmlFormElement>,
    pub search_input: Option<HtmlInputElement>,
    pub category_links: Vec<Element>,
    pub payment_methods: Vec<Element>,
    pub selected_payment_method: Option<HtmlInputElement>,
    pub card_fields: Option<HtmlElement>,
    pub chat_form: Option<HtmlFormElement>,
    pub message_input: Option<HtmlInputElement>,
    pub chat_messages: Option<HtmlElement>,
    pub product_image: Option<HtmlInputElement>,
    pub image_preview: Option<HtmlElement>,
    pub language_btn: Option<HtmlElement>,
    pub language_dropdown: Option<HtmlElement>,
    pub tooltip_targets: Vec<HtmlElement>,
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        if gloo_utils::document().body().is_none() {
            return Err(JsValue::from_str("document has no body"));
        }
        Ok(Elements {
            buyer_form: by_id_typed("buyerLoginForm"),
            seller_form: by_id_typed("sellerLoginForm"),
            login_error: by_id_typed("loginError"),
            tabs: query_all(".tab[data-tab]"),
            email_inputs: query_all_typed("input[type=\"email\"]"),
            modal_openers: query_all("[data-open-modal]"),
            modal_closers: query_all("[data-close-modal]"),

            cart_content: by_id_typed("cartContent"),
            add_to_cart_btns: query_all_typed(".add-to-cart"),
            cart_counts: query_all_typed(".cart-count"),

            tutorial_container: by_id_typed("tutorialContainer"),
            tutorial_content: by_id_typed("tutorialContent"),
            generate_tutorial_btn: by_id_typed("generateTutorialBtn"),
            share_tutorial_btn: by_id_typed("shareTutorialBtn"),

            search_form: by_id_typed("searchForm"),
            search_input: by_id_typed("searchInput"),
            category_links: query_all(".category-filter[data-category]"),
            payment_methods: query_all(".payment-method[data-method]"),
            selected_payment_method: by_id_typed("selectedPaymentMethod"),
            card_fields: by_id_typed("cardFields"),
            chat_form: by_id_typed("chatForm"),
            message_input: by_id_typed("messageInput"),
            chat_messages: by_id_typed("chatMessages"),
            product_image: by_id_typed("productImage"),
            image_preview: by_id_typed("imagePreview"),
            language_btn: query(".language-btn").and_then(|e| e.dyn_into().ok()),
            language_dropdown: query(".language-dropdown").and_then(|e| e.dyn_into().ok()),
            tooltip_targets: query_all_typed("[data-tooltip]"),
        })
    }
}
