use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use mb_common::Cents;
use modabella_engine::{
    db_types::{Order, OrderId, OrderStatus},
    traits::{PaymentHandle, PaymentProviderError},
    CheckoutApi,
    CheckoutSettings,
};
use serde_json::json;

use super::{
    helpers::post_request,
    mocks::{MockPaymentProcessor, MockShopDb},
};
use crate::routes::CheckoutRoute;

fn pending_order(id: i64, total: Cents) -> Order {
    Order {
        id: OrderId(id),
        user_id: Some(1),
        total,
        status: OrderStatus::Pending,
        external_reference: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn checkout_body() -> serde_json::Value {
    json!({
        "user_id": 1,
        "total": 39.80,
        "email": "cliente@exemplo.com",
        "items": [{"id": 7, "name": "Vestido Floral", "price": 19.90, "quantity": 2}]
    })
}

#[actix_web::test]
async fn checkout_happy_path() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/api/checkout", checkout_body(), configure_success).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"message":"Pedido criado com sucesso","order_id":15,"init_point":"https://pay.example.com/pref-15"}"#
    );
}

#[actix_web::test]
async fn checkout_with_no_items_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let body = json!({"user_id": 1, "total": 0.0, "items": []});
    let (status, body) = post_request("/api/checkout", body, configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("at least one item"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn checkout_database_failure_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/api/checkout", checkout_body(), configure_db_failure).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Database error"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn checkout_gateway_failure_names_the_dangling_order() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/api/checkout", checkout_body(), configure_gateway_failure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Order #15"), "The body must name the dangling order. Got: {body}");
}

fn configure_success(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_order().returning(|order| Ok(pending_order(15, order.total)));
    let mut processor = MockPaymentProcessor::new();
    processor
        .expect_create_preference()
        .withf(|spec| {
            spec.external_reference == "15" &&
                spec.payer_email == "cliente@exemplo.com" &&
                spec.items[0].unit_price == 19.90
        })
        .returning(|spec| {
            Ok(PaymentHandle {
                preference_id: format!("pref-{}", spec.external_reference),
                redirect_url: format!("https://pay.example.com/pref-{}", spec.external_reference),
            })
        });
    let api = CheckoutApi::new(db, processor, CheckoutSettings::default());
    cfg.service(CheckoutRoute::<MockShopDb, MockPaymentProcessor>::new()).app_data(web::Data::new(api));
}

// Invalid requests must be rejected before the engine sees them, so neither mock expects any call.
fn configure_untouched(cfg: &mut ServiceConfig) {
    let api = CheckoutApi::new(MockShopDb::new(), MockPaymentProcessor::new(), CheckoutSettings::default());
    cfg.service(CheckoutRoute::<MockShopDb, MockPaymentProcessor>::new()).app_data(web::Data::new(api));
}

fn configure_db_failure(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_order()
        .returning(|_| Err(modabella_engine::traits::ShopDatabaseError::DatabaseError("disk I/O error".to_string())));
    let api = CheckoutApi::new(db, MockPaymentProcessor::new(), CheckoutSettings::default());
    cfg.service(CheckoutRoute::<MockShopDb, MockPaymentProcessor>::new()).app_data(web::Data::new(api));
}

fn configure_gateway_failure(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_order().returning(|order| Ok(pending_order(15, order.total)));
    let mut processor = MockPaymentProcessor::new();
    processor
        .expect_create_preference()
        .returning(|_| Err(PaymentProviderError::Upstream("invalid access token".to_string())));
    let api = CheckoutApi::new(db, processor, CheckoutSettings::default());
    cfg.service(CheckoutRoute::<MockShopDb, MockPaymentProcessor>::new()).app_data(web::Data::new(api));
}
