use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use mb_common::Cents;
use modabella_engine::{
    db_types::{Order, OrderId, OrderStatus, PaymentEvent, StockDirection},
    traits::{PaymentProviderError, PaymentState, SettleOrderResult},
    OrderFlowApi,
};
use serde_json::json;

use super::{
    helpers::post_request,
    mocks::{MockConfirmationMailer, MockPaymentProcessor, MockShopDb},
};
use crate::routes::PaymentWebhookRoute;

const WEBHOOK_PATH: &str = "/api/payment/webhook";

fn settled_order(id: i64) -> Order {
    Order {
        id: OrderId(id),
        user_id: Some(1),
        total: Cents::from(3980),
        status: OrderStatus::Processing,
        external_reference: Some("555".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn register(cfg: &mut ServiceConfig, db: MockShopDb, processor: MockPaymentProcessor, mailer: MockConfirmationMailer) {
    let api = OrderFlowApi::new(db, processor, mailer);
    cfg.service(PaymentWebhookRoute::<MockShopDb, MockPaymentProcessor, MockConfirmationMailer>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn non_payment_notification_is_acknowledged_untouched() {
    let _ = env_logger::try_init().ok();
    let body = json!({"type": "plan", "data": {"id": 123}});
    // No expectations are set: any call into the engine would panic the mock.
    let (status, body) = post_request(WEBHOOK_PATH, body, configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Notification ignored."}"#);
}

#[actix_web::test]
async fn notification_without_payment_id_is_acknowledged() {
    let _ = env_logger::try_init().ok();
    let body = json!({"type": "payment", "data": {"id": "undefined"}});
    let (status, body) = post_request(WEBHOOK_PATH, body, configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":false,"message":"Notification carries no payment id."}"#);
}

#[actix_web::test]
async fn approved_payment_settles_the_order() {
    let _ = env_logger::try_init().ok();
    let body = json!({"type": "payment", "data": {"id": "555"}});
    let (status, body) = post_request(WEBHOOK_PATH, body, configure_approved).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Notification processed."}"#);
}

#[actix_web::test]
async fn replayed_notification_is_acknowledged() {
    let _ = env_logger::try_init().ok();
    let body = json!({"type": "payment", "data": {"id": 555}});
    let (status, body) = post_request(WEBHOOK_PATH, body, configure_replay).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Order already settled."}"#);
}

#[actix_web::test]
async fn provider_failure_still_returns_200() {
    let _ = env_logger::try_init().ok();
    let body = json!({"type": "payment", "data": {"id": 555}});
    let (status, body) = post_request(WEBHOOK_PATH, body, configure_provider_failure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":false,"message":"Could not process the notification."}"#);
}

#[actix_web::test]
async fn unreadable_body_still_returns_200() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request(WEBHOOK_PATH, json!("not a notification"), configure_untouched)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":false,"message":"Could not read the notification body."}"#);
}

fn configure_untouched(cfg: &mut ServiceConfig) {
    register(cfg, MockShopDb::new(), MockPaymentProcessor::new(), MockConfirmationMailer::new());
}

fn configure_approved(cfg: &mut ServiceConfig) {
    let mut processor = MockPaymentProcessor::new();
    processor.expect_payment_state().returning(|id| {
        Ok(PaymentState {
            payment_id: id,
            status: PaymentEvent::Approved,
            external_reference: Some("15".to_string()),
            payer_email: Some("cliente@exemplo.com".to_string()),
        })
    });
    let mut db = MockShopDb::new();
    db.expect_settle_order()
        .withf(|id, status, payment_id, adjust| {
            *id == OrderId(15) &&
                *status == OrderStatus::Processing &&
                payment_id == "555" &&
                *adjust == Some(StockDirection::Sale)
        })
        .returning(|_, _, _, _| Ok(SettleOrderResult::Settled(settled_order(15))));
    let mut mailer = MockConfirmationMailer::new();
    mailer
        .expect_send_order_confirmation()
        .times(1)
        .withf(|recipient, order_id| recipient == "cliente@exemplo.com" && *order_id == OrderId(15))
        .returning(|_, _| Ok(()));
    register(cfg, db, processor, mailer);
}

fn configure_replay(cfg: &mut ServiceConfig) {
    let mut processor = MockPaymentProcessor::new();
    processor.expect_payment_state().returning(|id| {
        Ok(PaymentState {
            payment_id: id,
            status: PaymentEvent::Approved,
            external_reference: Some("15".to_string()),
            payer_email: Some("cliente@exemplo.com".to_string()),
        })
    });
    let mut db = MockShopDb::new();
    db.expect_settle_order().returning(|_, _, _, _| Ok(SettleOrderResult::AlreadyPaid(settled_order(15))));
    // No email on a replay.
    register(cfg, db, processor, MockConfirmationMailer::new());
}

fn configure_provider_failure(cfg: &mut ServiceConfig) {
    let mut processor = MockPaymentProcessor::new();
    processor
        .expect_payment_state()
        .returning(|_| Err(PaymentProviderError::Timeout("deadline has elapsed".to_string())));
    register(cfg, MockShopDb::new(), processor, MockConfirmationMailer::new());
}
