use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Order, OrderId, OrderStatus, StockDirection},
    mbe_api::errors::OrderFlowError,
    traits::{Mailer, PaymentProvider, PaymentState, SettleOrderResult, ShopDatabase},
};

/// What a reconciliation attempt did. Every variant is a success from the processor's point of view; the webhook
/// boundary acknowledges all of them.
#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    /// The order transitioned to a new status. `side_effects` is true when this was the paid transition that also
    /// adjusted stock and triggered the confirmation email.
    Settled { order: Order, side_effects: bool },
    /// The order already signalled a received payment; the notification was a replay and nothing was mutated.
    AlreadyPaid(OrderId),
    /// The payment's external reference does not match any local order.
    UnknownOrder(String),
    /// The payment carries no usable external reference. Payments this store did not originate end up here.
    UnmatchedReference,
}

/// `OrderFlowApi` is the webhook reconciler. It resolves a payment notification to the processor's authoritative
/// payment state, maps that onto the order's status and runs the paid-order side effects exactly once.
pub struct OrderFlowApi<B, P, M> {
    db: B,
    provider: P,
    mailer: M,
}

impl<B, P, M> Debug for OrderFlowApi<B, P, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, P, M> OrderFlowApi<B, P, M> {
    pub fn new(db: B, provider: P, mailer: M) -> Self {
        Self { db, provider, mailer }
    }
}

impl<B, P, M> OrderFlowApi<B, P, M>
where
    B: ShopDatabase,
    P: PaymentProvider,
    M: Mailer,
{
    /// Reconciles a single payment notification.
    ///
    /// The notification body is untrusted; only the payment id is taken from it. The flow is:
    /// 1. Fetch the payment's current state from the processor.
    /// 2. Resolve the external reference to a local order id. Unmatched references are dropped.
    /// 3. Map the processor status to an order status (see [`crate::db_types::PaymentEvent::target_order_status`]).
    /// 4. Apply the guarded settle. Orders that already received payment are a sink; replays land here and do
    ///    nothing. When the new status is the paid status, the stock decrement happens in the same database
    ///    transaction as the status write.
    /// 5. On the paid transition only, send the confirmation email. Delivery is best-effort: a failure is logged
    ///    and swallowed, never propagated.
    ///
    /// Errors from the database or the processor propagate to the caller, which must still acknowledge the webhook.
    pub async fn process_payment_notification(
        &self,
        payment_id: u64,
    ) -> Result<ReconcileOutcome, OrderFlowError> {
        let payment = self.provider.payment_state(payment_id).await?;
        trace!("🔄️💰️ Payment #{payment_id} resolved with status '{}'", payment.status);
        let order_id = match extract_order_id(&payment) {
            Some(id) => id,
            None => {
                info!(
                    "🔄️💰️ Payment #{payment_id} carries no parseable external reference \
                     ({:?}). Dropping the notification.",
                    payment.external_reference
                );
                return Ok(ReconcileOutcome::UnmatchedReference);
            },
        };
        let target = payment.status.target_order_status();
        let adjust = (target == OrderStatus::Processing).then_some(StockDirection::Sale);
        let result = self.db.settle_order(order_id, target, &payment_id.to_string(), adjust).await?;
        match result {
            SettleOrderResult::Settled(order) => {
                debug!("🔄️💰️ Order {order_id} moved to {} by payment #{payment_id}", order.status);
                let paid_now = target == OrderStatus::Processing;
                if paid_now {
                    self.send_confirmation(&payment, order_id).await;
                }
                Ok(ReconcileOutcome::Settled { order, side_effects: paid_now })
            },
            SettleOrderResult::AlreadyPaid(order) => {
                debug!(
                    "🔄️💰️ Order {order_id} is already {}; notification for payment #{payment_id} is a replay",
                    order.status
                );
                Ok(ReconcileOutcome::AlreadyPaid(order_id))
            },
            SettleOrderResult::NotFound => {
                warn!("🔄️💰️ Payment #{payment_id} references order {order_id}, which does not exist. Dropping.");
                Ok(ReconcileOutcome::UnknownOrder(order_id.to_string()))
            },
        }
    }

    async fn send_confirmation(&self, payment: &PaymentState, order_id: OrderId) {
        let Some(recipient) = payment.payer_email.as_deref() else {
            warn!("🔄️📧️ Payment #{} has no payer email; skipping the confirmation for order {order_id}", payment.payment_id);
            return;
        };
        if let Err(e) = self.mailer.send_order_confirmation(recipient, order_id).await {
            // Email is best-effort. The order is already settled and stock adjusted; never fail the flow here.
            error!("🔄️📧️ Could not send the confirmation for order {order_id}: {e}");
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

fn extract_order_id(payment: &PaymentState) -> Option<OrderId> {
    payment.external_reference.as_deref().and_then(|s| s.parse().ok())
}
