//! Cart client: list, add, remove, and count sync.
//!
//! The per-page-load state machine is `Idle -> Loading -> {Empty | Loaded |
//! Failed}`; a reload goes back through `Loading`. Totals are the sum of the
//! server's line totals; prices are never recomputed here.

use aa_api_types::{
    AddToCartRequest, ApiAck, CartCountResponse, CartItem, CartResponse, RemoveFromCartRequest,
};

use crate::busy::{ADDING_LABEL, BusyGuard, Control};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::store::{CartCountStore, KeyValueStore};
use crate::templates;
use crate::transport::{Transport, with_query};

pub const PRODUCT_ID_MISSING: &str = "Product ID not found.";
pub const LOGIN_TO_ADD: &str = "Please login to add items to your cart";
pub const ADD_FAILED: &str = "Failed to add item to cart.";
pub const ADD_UNAVAILABLE: &str = "Error adding item to cart.";
pub const REMOVE_FAILED: &str = "Failed to remove item from cart";
pub const REMOVE_UNAVAILABLE: &str = "Error removing item from cart";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CartView {
    #[default]
    Idle,
    Loading,
    Empty,
    Loaded { items: Vec<CartItem>, total: f64 },
    Failed(String),
}

impl CartView {
    pub fn to_html(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Loading => templates::cart_loading(),
            Self::Empty => templates::cart_empty(),
            Self::Loaded { items, total } => templates::cart_items(items, *total),
            Self::Failed(_) => templates::cart_error(),
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Loaded { items, .. } => items.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CartSession {
    view: CartView,
}

impl CartSession {
    pub fn view(&self) -> &CartView {
        &self.view
    }

    pub fn begin_load(&mut self) {
        self.view = CartView::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Vec<CartItem>>) {
        self.view = match result {
            Ok(items) if items.is_empty() => CartView::Empty,
            Ok(items) => {
                let total = cart_total(&items);
                CartView::Loaded { items, total }
            }
            Err(err) => {
                tracing::warn!(%err, "error loading cart");
                CartView::Failed(err.to_string())
            }
        };
    }
}

pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(|item| item.total_price).sum()
}

fn server_error(status: u16, body: &str, fallback: &str) -> StorefrontError {
    if status == 401 {
        return StorefrontError::Unauthorized;
    }
    let message = serde_json::from_str::<ApiAck>(body)
        .ok()
        .and_then(|ack| ack.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_owned());
    StorefrontError::Server { status, message }
}

/// GET the cart for `user_id`. A missing `items` field means an empty cart.
pub async fn fetch_cart<T: Transport + ?Sized>(
    transport: &T,
    config: &StorefrontConfig,
    user_id: &str,
) -> Result<Vec<CartItem>> {
    let path = with_query(&config.endpoints.cart_list, "user_id", user_id);
    let reply = transport.get(&path).await?;
    if !reply.is_success() {
        return Err(server_error(reply.status, &reply.body, "Failed to fetch cart"));
    }
    let cart: CartResponse = reply.json()?;
    Ok(cart.items.unwrap_or_default())
}

/// Drive one full load through the session.
pub async fn load_cart<T: Transport + ?Sized>(
    transport: &T,
    config: &StorefrontConfig,
    user_id: &str,
    session: &mut CartSession,
) {
    session.begin_load();
    let result = fetch_cart(transport, config, user_id).await;
    session.finish_load(result);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRef {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
}

impl ProductRef {
    pub fn display_name(&self) -> &str {
        self.product_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Item")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToCartOutcome {
    Added { product_name: String },
    LoginRequired,
    Failed(String),
}

impl AddToCartOutcome {
    pub fn notice(&self) -> String {
        match self {
            Self::Added { product_name } => format!("{product_name} added to cart!"),
            Self::LoginRequired => LOGIN_TO_ADD.to_owned(),
            Self::Failed(message) => message.clone(),
        }
    }
}

/// POST one unit of `product_id`.
pub async fn post_add_to_cart<T: Transport + ?Sized>(
    transport: &T,
    config: &StorefrontConfig,
    product_id: &str,
) -> Result<()> {
    let body = serde_json::to_value(AddToCartRequest {
        product_id: product_id.to_owned(),
        quantity: 1,
    })?;
    let reply = transport.post_json(&config.endpoints.cart_add, &body).await?;
    if !reply.is_success() {
        return Err(server_error(reply.status, &reply.body, ADD_FAILED));
    }
    let ack: ApiAck = reply.json()?;
    if ack.success {
        Ok(())
    } else {
        Err(StorefrontError::Server {
            status: reply.status,
            message: ack.error.unwrap_or_else(|| ADD_FAILED.to_owned()),
        })
    }
}

/// Full add-to-cart action: validation, busy control, request, and the
/// optimistic `+1` on the count. The control is restored on every path.
pub async fn add_to_cart<T, S, C>(
    transport: &T,
    config: &StorefrontConfig,
    counter: &CartCountStore<S>,
    trigger: &C,
    product: &ProductRef,
) -> AddToCartOutcome
where
    T: Transport + ?Sized,
    S: KeyValueStore,
    C: Control + ?Sized,
{
    let Some(product_id) = product.product_id.as_deref().filter(|id| !id.is_empty()) else {
        return AddToCartOutcome::Failed(PRODUCT_ID_MISSING.to_owned());
    };

    let _busy = BusyGuard::engage(trigger, ADDING_LABEL);
    match post_add_to_cart(transport, config, product_id).await {
        Ok(()) => {
            counter.apply_delta(1);
            AddToCartOutcome::Added {
                product_name: product.display_name().to_owned(),
            }
        }
        Err(StorefrontError::Unauthorized) => AddToCartOutcome::LoginRequired,
        Err(err) => {
            tracing::warn!(product_id, %err, "error adding to cart");
            AddToCartOutcome::Failed(err.user_message(ADD_UNAVAILABLE))
        }
    }
}

/// POST the removal of one cart row. Callers reload the whole list on success.
pub async fn remove_item<T: Transport + ?Sized>(
    transport: &T,
    config: &StorefrontConfig,
    cart_item_id: i64,
) -> Result<()> {
    let body = serde_json::to_value(RemoveFromCartRequest { cart_item_id })?;
    let reply = transport.post_json(&config.endpoints.cart_remove, &body).await?;
    if reply.is_success() {
        Ok(())
    } else {
        Err(StorefrontError::Server {
            status: reply.status,
            message: REMOVE_FAILED.to_owned(),
        })
    }
}

pub fn remove_failure_notice(err: &StorefrontError) -> String {
    match err {
        StorefrontError::Transport(_) | StorefrontError::Parse(_) => REMOVE_UNAVAILABLE.to_owned(),
        _ => REMOVE_FAILED.to_owned(),
    }
}

/// Once per page load: adopt the server's count when a user is known,
/// otherwise repaint the locally stored value.
pub async fn sync_cart_count<T, S>(
    transport: &T,
    config: &StorefrontConfig,
    counter: &CartCountStore<S>,
    user_id: Option<&str>,
) -> i64
where
    T: Transport + ?Sized,
    S: KeyValueStore,
{
    let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
        return counter.refresh();
    };

    let path = with_query(&config.endpoints.cart_count, "user_id", user_id);
    let fetched = match transport.get(&path).await {
        Ok(reply) => reply.json::<CartCountResponse>(),
        Err(err) => Err(err),
    };
    match fetched {
        Ok(resp) if resp.success => {
            counter.set(resp.count);
            resp.count
        }
        Ok(_) => counter.current(),
        Err(err) => {
            tracing::warn!(%err, "error fetching cart count");
            counter.current()
        }
    }
}
