//! Hover tooltips for `[data-tooltip]` elements.

use std::cell::RefCell;
use std::rc::Rc;

use aa_storefront::debounce::Debouncer;
use aa_storefront::tooltip::{Rect, tooltip_position};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::dom;
use crate::events::listen;
use crate::state::Ctx;

/// The tooltip on screen and the element it describes.
type Showing = Rc<RefCell<Option<(HtmlElement, HtmlElement)>>>;

fn place(target: &HtmlElement, tooltip: &HtmlElement) {
    let rect = target.get_bounding_client_rect();
    let (left, top) = tooltip_position(
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        },
        f64::from(tooltip.offset_width()),
        f64::from(tooltip.offset_height()),
    );
    let style = tooltip.style();
    let _ = style.set_property("left", &format!("{left}px"));
    let _ = style.set_property("top", &format!("{top}px"));
}

fn show(showing: &Showing, target: &HtmlElement) -> Result<(), JsValue> {
    hide(showing);
    let text = target.get_attribute("data-tooltip").unwrap_or_default();
    let tooltip: HtmlElement = dom::document().create_element("div")?.dyn_into()?;
    tooltip.set_class_name("tooltip");
    tooltip.set_text_content(Some(&text));
    dom::document()
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&tooltip)?;
    place(target, &tooltip);
    *showing.borrow_mut() = Some((target.clone(), tooltip));
    Ok(())
}

fn hide(showing: &Showing) {
    if let Some((_, tooltip)) = showing.borrow_mut().take() {
        tooltip.remove();
    }
}

fn reposition(showing: &Showing) {
    if let Some((target, tooltip)) = showing.borrow().as_ref() {
        place(target, tooltip);
    }
}

pub fn bind(ctx: &Ctx) -> Result<(), JsValue> {
    let showing: Showing = Rc::default();

    for target in &ctx.els.tooltip_targets {
        let enter_showing = showing.clone();
        let enter_target = target.clone();
        listen(target, "mouseenter", move |_: MouseEvent| {
            if let Err(err) = show(&enter_showing, &enter_target) {
                gloo_console::warn!(format!("tooltip failed: {err:?}"));
            }
        })?;

        let leave_showing = showing.clone();
        listen(target, "mouseleave", move |_: MouseEvent| hide(&leave_showing))?;
    }

    // Resize bursts collapse into one trailing reposition.
    let debouncer: Rc<RefCell<Debouncer<Timeout>>> =
        Rc::new(RefCell::new(Debouncer::new(ctx.config.tooltip_resize_debounce_ms)));
    listen(&dom::window(), "resize", move |_: Event| {
        let showing = showing.clone();
        debouncer
            .borrow_mut()
            .call(|wait| Timeout::new(wait, move || reposition(&showing)));
    })
}
