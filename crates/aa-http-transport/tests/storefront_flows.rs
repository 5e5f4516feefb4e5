//! End-to-end storefront flows against an in-process stub backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aa_api_types::{AddToCartRequest, CartItem, LoginRequest, RemoveFromCartRequest, UserRole, UserTypeRequest};
use aa_http_transport::ReqwestTransport;
use aa_storefront::auth::{self, Credentials, LoginOutcome};
use aa_storefront::busy::Control;
use aa_storefront::cart::{self, AddToCartOutcome, CartSession, CartView, ProductRef};
use aa_storefront::tutorial::{self, ProductInfo, RemoteTutorialSource};
use aa_storefront::{CartCountStore, MemoryStore, StorefrontConfig};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::cell::{Cell, RefCell};

const SESSION_COOKIE: &str = "session=buyer-7";

#[derive(Default)]
struct Backend {
    items: Vec<CartItem>,
    next_id: i64,
    script_calls: usize,
}

type Shared = Arc<Mutex<Backend>>;

fn logged_in(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(SESSION_COOKIE))
}

fn count_script_call(state: &Shared, headers: &HeaderMap) {
    if headers.get("x-requested-with").and_then(|v| v.to_str().ok()) == Some("XMLHttpRequest") {
        if let Ok(mut backend) = state.lock() {
            backend.script_calls += 1;
        }
    }
}

async fn buyer_login(State(state): State<Shared>, headers: HeaderMap, Json(req): Json<LoginRequest>) -> impl IntoResponse {
    count_script_call(&state, &headers);
    if req.password != "secret" || req.verification_code.is_some() {
        return (
            StatusCode::UNAUTHORIZED,
            [(header::SET_COOKIE, "ignored=1".to_owned())],
            Json(json!({ "message": "Invalid email or password" })),
        );
    }
    (
        StatusCode::OK,
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/"))],
        Json(json!({ "message": "ok", "redirect": "/buyer_dashboard?welcome=1" })),
    )
}

async fn seller_login(Json(req): Json<LoginRequest>) -> impl IntoResponse {
    if req.verification_code.as_deref() == Some("123456") {
        (StatusCode::OK, Json(json!({ "message": "ok" })))
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid verification code" })))
    }
}

async fn check_user_type(Json(req): Json<UserTypeRequest>) -> impl IntoResponse {
    let user_type = if req.email.starts_with("maker") { "seller" } else { "buyer" };
    Json(json!({ "user_type": user_type }))
}

async fn cart_add(State(state): State<Shared>, headers: HeaderMap, Json(req): Json<AddToCartRequest>) -> impl IntoResponse {
    if !logged_in(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "success": false, "error": "Authentication required" })));
    }
    let Ok(product_id) = req.product_id.parse::<i64>() else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "success": false, "error": "Unknown product" })));
    };
    let Ok(mut backend) = state.lock() else {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false })));
    };
    backend.next_id += 1;
    let cart_item_id = backend.next_id;
    let quantity = i64::from(req.quantity);
    backend.items.push(CartItem {
        cart_item_id,
        product_id: Some(product_id),
        name: format!("Product {product_id}"),
        quantity,
        price: 10.0,
        total_price: 10.0 * quantity as f64,
    });
    (StatusCode::OK, Json(json!({ "success": true, "message": "Item added to cart" })))
}

async fn cart_list(State(state): State<Shared>, Query(query): Query<HashMap<String, String>>) -> impl IntoResponse {
    if query.get("user_id").map(String::as_str) != Some("7") {
        return Json(json!({}));
    }
    let items = state.lock().map(|b| b.items.clone()).unwrap_or_default();
    Json(json!({ "items": items }))
}

async fn cart_remove(State(state): State<Shared>, Json(req): Json<RemoveFromCartRequest>) -> impl IntoResponse {
    let Ok(mut backend) = state.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };
    let before = backend.items.len();
    backend.items.retain(|item| item.cart_item_id != req.cart_item_id);
    if backend.items.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn cart_count(State(state): State<Shared>) -> impl IntoResponse {
    let count: i64 = state
        .lock()
        .map(|b| b.items.iter().map(|i| i.quantity).sum())
        .unwrap_or_default();
    Json(json!({ "success": true, "count": count }))
}

async fn tutorial_generate(Path(id): Path<String>, headers: HeaderMap) -> impl IntoResponse {
    if !logged_in(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "success": false, "error": "Authentication required" })));
    }
    let product = ProductInfo {
        id: id.clone(),
        name: format!("Product {id}"),
        materials: "Clay, Glaze".to_owned(),
        has_tutorial: false,
    };
    let tutorial = tutorial::synthesize_tutorial(&product, "19/10/2026");
    (StatusCode::OK, Json(json!({ "success": true, "tutorial": tutorial })))
}

async fn spawn_backend() -> anyhow::Result<(String, Shared)> {
    let state: Shared = Arc::new(Mutex::new(Backend::default()));
    let app = Router::new()
        .route("/buyer_login", post(buyer_login))
        .route("/seller_login", post(seller_login))
        .route("/api/check-user-type", post(check_user_type))
        .route("/cart/add", post(cart_add))
        .route("/api/cart", get(cart_list))
        .route("/cart/remove", post(cart_remove))
        .route("/api/cart/count", get(cart_count))
        .route("/product/{id}/tutorial/generate", get(tutorial_generate))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(%err, "stub backend stopped");
        }
    });
    Ok((format!("http://{addr}"), state))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("aa_storefront=debug,aa_http_transport=debug")
        .with_test_writer()
        .try_init();
}

struct TestButton {
    label: RefCell<String>,
    disabled: Cell<bool>,
}

impl TestButton {
    fn new(label: &str) -> Self {
        Self {
            label: RefCell::new(label.to_owned()),
            disabled: Cell::new(false),
        }
    }
}

impl Control for TestButton {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_owned();
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

fn buyer() -> Credentials {
    Credentials {
        email: "ravi@example.com".to_owned(),
        password: "secret".to_owned(),
        verification_code: None,
    }
}

fn vase() -> ProductRef {
    ProductRef {
        product_id: Some("9".to_owned()),
        product_name: Some("Clay Vase".to_owned()),
    }
}

#[tokio::test]
async fn add_requires_login_then_succeeds_with_session_cookie() -> anyhow::Result<()> {
    init_tracing();
    let (base_url, backend) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let config = StorefrontConfig::default();
    let counter = CartCountStore::new(MemoryStore::new());
    let button = TestButton::new("Add to Cart");

    let outcome = cart::add_to_cart(&transport, &config, &counter, &button, &vase()).await;
    assert_eq!(outcome, AddToCartOutcome::LoginRequired);
    assert_eq!(counter.current(), 0);

    let login = auth::submit_login(&transport, &config, UserRole::Buyer, buyer()).await;
    assert_eq!(login, LoginOutcome::Redirect("/buyer_dashboard?welcome=1".to_owned()));

    let outcome = cart::add_to_cart(&transport, &config, &counter, &button, &vase()).await;
    assert_eq!(outcome.notice(), "Clay Vase added to cart!");
    assert_eq!(counter.current(), 1);
    assert_eq!(button.label(), "Add to Cart");
    assert!(!button.disabled.get());

    let script_calls = backend.lock().map(|b| b.script_calls).unwrap_or_default();
    assert_eq!(script_calls, 1);
    Ok(())
}

#[tokio::test]
async fn failed_login_shows_server_message() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let config = StorefrontConfig::default();

    let wrong = Credentials {
        password: "nope".to_owned(),
        ..buyer()
    };
    let outcome = auth::submit_login(&transport, &config, UserRole::Buyer, wrong).await;
    assert_eq!(outcome, LoginOutcome::Rejected("Invalid email or password".to_owned()));

    let seller = Credentials {
        email: "maker@example.com".to_owned(),
        password: "secret".to_owned(),
        verification_code: Some("123456".to_owned()),
    };
    let outcome = auth::submit_login(&transport, &config, UserRole::Seller, seller).await;
    assert_eq!(outcome, LoginOutcome::Redirect("/seller_dashboard".to_owned()));
    Ok(())
}

#[tokio::test]
async fn user_type_lookup_picks_tab() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let config = StorefrontConfig::default();

    assert_eq!(
        auth::detect_user_type(&transport, &config, "maker@example.com").await,
        Some(UserRole::Seller)
    );
    assert_eq!(
        auth::detect_user_type(&transport, &config, "ravi@example.com").await,
        Some(UserRole::Buyer)
    );
    Ok(())
}

#[tokio::test]
async fn remove_then_reload_lists_remaining_rows() -> anyhow::Result<()> {
    init_tracing();
    let (base_url, _) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let config = StorefrontConfig::default();
    let counter = CartCountStore::new(MemoryStore::new());
    let button = TestButton::new("Add to Cart");

    auth::submit_login(&transport, &config, UserRole::Buyer, buyer()).await;
    for id in ["9", "10"] {
        let product = ProductRef {
            product_id: Some(id.to_owned()),
            product_name: None,
        };
        let outcome = cart::add_to_cart(&transport, &config, &counter, &button, &product).await;
        assert_eq!(outcome.notice(), "Item added to cart!");
    }

    let mut session = CartSession::default();
    cart::load_cart(&transport, &config, "7", &mut session).await;
    assert_eq!(session.view().row_count(), 2);

    cart::remove_item(&transport, &config, 1).await?;
    cart::load_cart(&transport, &config, "7", &mut session).await;
    match session.view() {
        CartView::Loaded { items, total } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].name, "Product 10");
            assert_eq!(*total, 10.0);
        }
        other => panic!("unexpected view {other:?}"),
    }

    let err = cart::remove_item(&transport, &config, 1).await.unwrap_err();
    assert_eq!(cart::remove_failure_notice(&err), cart::REMOVE_FAILED);
    Ok(())
}

#[tokio::test]
async fn unknown_user_sees_empty_cart() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let mut session = CartSession::default();

    cart::load_cart(&transport, &StorefrontConfig::default(), "99", &mut session).await;
    assert_eq!(*session.view(), CartView::Empty);
    Ok(())
}

#[tokio::test]
async fn count_sync_adopts_server_value() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let config = StorefrontConfig::default();
    if let Ok(mut b) = backend.lock() {
        b.items.push(CartItem {
            cart_item_id: 1,
            product_id: Some(3),
            name: "Bowl".to_owned(),
            quantity: 4,
            price: 2.5,
            total_price: 10.0,
        });
    }

    let counter = CartCountStore::new(MemoryStore::new());
    let painted = Arc::new(Mutex::new(Vec::new()));
    let sink = painted.clone();
    counter.subscribe(move |count| {
        if let Ok(mut seen) = sink.lock() {
            seen.push(count);
        }
    });

    assert_eq!(cart::sync_cart_count(&transport, &config, &counter, Some("7")).await, 4);
    assert_eq!(counter.current(), 4);
    assert_eq!(painted.lock().map(|p| p.clone()).unwrap_or_default(), vec![4]);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_keeps_local_count() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let transport = ReqwestTransport::new(Some(format!("http://{addr}")))?;
    let counter = CartCountStore::new(MemoryStore::new());
    counter.set(2);

    let count = cart::sync_cart_count(&transport, &StorefrontConfig::default(), &counter, Some("7")).await;
    assert_eq!(count, 2);
    Ok(())
}

#[tokio::test]
async fn remote_tutorial_needs_session() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let transport = ReqwestTransport::new(Some(base_url))?;
    let config = StorefrontConfig::default();
    let button = TestButton::new("Generate Tutorial");
    let product = ProductInfo {
        id: "12".to_owned(),
        name: "Product 12".to_owned(),
        ..ProductInfo::default()
    };

    let source = RemoteTutorialSource::new(&transport, &config);
    let err = tutorial::generate_tutorial(&source, &product, &button).await.unwrap_err();
    assert!(err.is_unauthorized());

    auth::submit_login(&transport, &config, UserRole::Buyer, buyer()).await;
    let generated = tutorial::generate_tutorial(&source, &product, &button).await?;
    assert_eq!(generated.title, "How to Make Product 12");
    assert_eq!(generated.materials_needed, vec!["Clay", "Glaze"]);
    assert_eq!(button.label(), "Generate Tutorial");
    Ok(())
}
