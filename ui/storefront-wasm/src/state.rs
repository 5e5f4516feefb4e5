//! Page-wide state.
//!
//! One `Ctx` is built at startup and cloned into every handler. Stores are
//! `Rc`-shared; `RefCell` borrows are always released before an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use aa_api_types::Tutorial;
use aa_storefront::cart::CartSession;
use aa_storefront::modal::{LoginPanel, ModalSet};
use aa_storefront::payment::PaymentSelection;
use aa_storefront::tutorial::{ProductInfo, TutorialState};
use aa_storefront::{CartCountStore, KeyValueStore, StorefrontConfig};
use gloo_storage::{LocalStorage, Storage};

use crate::api::FetchTransport;
use crate::dom::{self, Elements};

const CONFIG_SCRIPT_ID: &str = "storefront-config";
const PRODUCT_SCRIPT_ID: &str = "product-data";
const TUTORIAL_SCRIPT_ID: &str = "tutorial-data";

// ── localStorage ──

/// Raw string access to `localStorage`; values are not JSON-wrapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            gloo_console::warn!(format!("localStorage write of {key} failed: {err:?}"));
        }
    }
}

// ── Context ──

#[derive(Clone)]
pub struct Ctx {
    pub els: Elements,
    pub config: Rc<StorefrontConfig>,
    pub transport: Rc<FetchTransport>,
    pub cart_count: Rc<CartCountStore<BrowserStorage>>,
    pub modals: Rc<RefCell<ModalSet>>,
    pub login: Rc<RefCell<LoginPanel>>,
    pub cart: Rc<RefCell<CartSession>>,
    pub tutorial: Rc<RefCell<TutorialState>>,
    pub payment: Rc<RefCell<PaymentSelection>>,
    pub product: Option<Rc<ProductInfo>>,
}

impl Ctx {
    pub fn new(els: Elements, config: StorefrontConfig) -> Self {
        let cart_count = CartCountStore::with_key(BrowserStorage, &config.cart_count_key);
        Self {
            els,
            transport: Rc::new(FetchTransport::new(&config)),
            config: Rc::new(config),
            cart_count: Rc::new(cart_count),
            modals: Rc::default(),
            login: Rc::default(),
            cart: Rc::default(),
            tutorial: Rc::new(RefCell::new(TutorialState::new(read_tutorial()))),
            payment: Rc::default(),
            product: read_product().map(Rc::new),
        }
    }

    /// Signed-in user, as rendered by the server into the cart panel or body.
    pub fn user_id(&self) -> Option<String> {
        self.els
            .cart_content
            .as_ref()
            .and_then(|el| dom::data(el, "user-id"))
            .or_else(|| dom::document().body().and_then(|b| dom::data(&b, "user-id")))
    }
}

// ── Embedded page data ──

pub fn read_config() -> StorefrontConfig {
    let raw = dom::json_script(CONFIG_SCRIPT_ID).unwrap_or_default();
    StorefrontConfig::from_json(&raw).unwrap_or_else(|err| {
        gloo_console::warn!(format!("ignoring storefront config: {err}"));
        StorefrontConfig::default()
    })
}

fn read_product() -> Option<ProductInfo> {
    let raw = dom::json_script(PRODUCT_SCRIPT_ID)?;
    serde_json::from_str(&raw)
        .map_err(|err| gloo_console::warn!(format!("ignoring product data: {err}")))
        .ok()
}

fn read_tutorial() -> Option<Tutorial> {
    let raw = dom::json_script(TUTORIAL_SCRIPT_ID)?;
    serde_json::from_str::<Option<Tutorial>>(&raw)
        .map_err(|err| gloo_console::warn!(format!("ignoring tutorial data: {err}")))
        .ok()
        .flatten()
}
