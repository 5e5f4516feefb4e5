//! Lazy image loading.

use std::rc::Rc;

use aa_storefront::lazy::{LAZY_SELECTOR, LAZY_SRC_ATTR, LOADED_CLASS, LazyOptions, LoadStrategy};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::events::listen;
use crate::state::Ctx;

fn observer_supported() -> bool {
    js_sys::Reflect::has(&dom::window(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Move `data-src` into `src`.
fn swap_source(img: &HtmlImageElement) {
    if let Some(src) = img.get_attribute(LAZY_SRC_ATTR) {
        img.set_src(&src);
        let _ = img.remove_attribute(LAZY_SRC_ATTR);
    }
}

fn watch_load(img: &HtmlImageElement, options: &Rc<LazyOptions>) -> Result<(), JsValue> {
    let loaded = img.clone();
    listen(img, "load", move |_: Event| dom::add_class(&loaded, LOADED_CLASS))?;

    let failed = img.clone();
    let options = options.clone();
    listen(img, "error", move |_: Event| {
        if let Some(fallback) = options.fallback_for(&failed.src()) {
            failed.set_src(fallback);
        }
    })
}

fn on_intersect(entries: js_sys::Array, observer: IntersectionObserver, options: &Rc<LazyOptions>) {
    for entry in entries.iter() {
        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
        if !entry.is_intersecting() {
            continue;
        }
        let Ok(img) = entry.target().dyn_into::<HtmlImageElement>() else { continue };
        if let Err(err) = watch_load(&img, options) {
            gloo_console::warn!(format!("lazy image listeners failed: {err:?}"));
        }
        swap_source(&img);
        observer.unobserve(&img);
    }
}

pub fn init(ctx: &Ctx) -> Result<(), JsValue> {
    let images: Vec<HtmlImageElement> = dom::query_all_typed(LAZY_SELECTOR);
    if images.is_empty() {
        return Ok(());
    }

    match LoadStrategy::detect(observer_supported()) {
        LoadStrategy::Eager => images.iter().for_each(swap_source),
        LoadStrategy::Observe => {
            let options = Rc::new(LazyOptions::from(ctx.config.as_ref()));
            let init = IntersectionObserverInit::new();
            init.set_root_margin(&options.root_margin);
            init.set_threshold(&JsValue::from_f64(options.threshold));

            let cb_options = options.clone();
            let cb = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
                on_intersect(entries, observer, &cb_options);
            }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
            let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)?;
            cb.forget();

            for img in &images {
                observer.observe(img);
            }
        }
    }
    Ok(())
}
