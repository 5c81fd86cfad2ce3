use thiserror::Error;

use crate::db_types::OrderId;

/// The outbound contract to the transactional-email service. Delivery is best-effort: the reconciler logs and
/// swallows failures, so implementations should not retry internally either.
#[allow(async_fn_in_trait)]
pub trait Mailer: Clone {
    async fn send_order_confirmation(&self, recipient: &str, order_id: OrderId) -> Result<(), MailerError>;
}

#[derive(Debug, Clone, Error)]
#[error("Email delivery failed: {0}")]
pub struct MailerError(pub String);
