use thiserror::Error;

use crate::db_types::PaymentEvent;

/// The outbound contract to the payment processor. Both calls are synchronous HTTP under the hood with no retries;
/// failures surface as-is to the caller.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider: Clone {
    /// Registers a checkout preference with the processor and returns the handle the buyer is redirected to.
    async fn create_preference(&self, spec: &PreferenceSpec) -> Result<PaymentHandle, PaymentProviderError>;

    /// Fetches the current, authoritative state of a payment. The reconciler always calls this rather than trusting
    /// a status embedded in a webhook body, since notifications can be delayed or replayed with stale data.
    async fn payment_state(&self, payment_id: u64) -> Result<PaymentState, PaymentProviderError>;
}

//--------------------------------------    PreferenceSpec     -------------------------------------------------------
/// One line of a payment preference, in the processor's units (decimal reais).
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceLine {
    pub product_id: String,
    pub title: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectTargets {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// Everything the processor needs to build a checkout preference. `external_reference` is the local order id and
/// must be unique per order; it is the join key the reconciler uses later.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSpec {
    pub items: Vec<PreferenceLine>,
    pub payer_email: String,
    pub external_reference: String,
    pub redirect_targets: RedirectTargets,
}

//--------------------------------------     PaymentHandle     -------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentHandle {
    pub preference_id: String,
    pub redirect_url: String,
}

//--------------------------------------     PaymentState      -------------------------------------------------------
/// The authoritative state of a payment as fetched from the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentState {
    pub payment_id: u64,
    pub status: PaymentEvent,
    /// The local order id, as embedded at checkout time. Absent for payments this store did not originate.
    pub external_reference: Option<String>,
    pub payer_email: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum PaymentProviderError {
    #[error("The payment processor did not respond in time: {0}")]
    Timeout(String),
    #[error("Payment processor error: {0}")]
    Upstream(String),
}

impl PaymentProviderError {
    /// Timeouts may be retried by the caller; upstream rejections are definitive.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentProviderError::Timeout(_))
    }
}
