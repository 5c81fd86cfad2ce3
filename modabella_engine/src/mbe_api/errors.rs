use thiserror::Error;

use crate::{
    db_types::OrderId,
    traits::{PaymentProviderError, ShopDatabaseError},
};

/// Checkout failures. The two main variants are deliberately distinct: a database failure means no order exists,
/// while a provider failure leaves a dangling `Pending` order that needs manual reconciliation.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("Invalid checkout request: {0}")]
    InvalidOrder(String),
    #[error("Could not create the order: {0}")]
    Database(#[from] ShopDatabaseError),
    #[error("Order {order_id} was created, but the payment preference could not be: {source}")]
    PaymentProvider {
        order_id: OrderId,
        #[source]
        source: PaymentProviderError,
    },
}

/// Reconciliation failures. These are logged and swallowed at the webhook boundary; the processor always receives
/// a success acknowledgment.
#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error during reconciliation: {0}")]
    Database(#[from] ShopDatabaseError),
    #[error("Could not resolve the payment with the processor: {0}")]
    Provider(#[from] PaymentProviderError),
}
