use serde::{Deserialize, Serialize};

/// One line of a checkout preference. Prices are decimal reais on the wire, which is what the processor expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceItem {
    pub id: String,
    pub title: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payer {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// The body of a create-preference request.
///
/// `external_reference` carries the local order id and is the join key used to match the asynchronous payment
/// notification back to the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub payer: Payer,
    pub external_reference: String,
    pub back_urls: BackUrls,
    pub auto_return: String,
}

/// The processor's response to a create-preference call. `init_point` is the URL the buyer is redirected to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preference {
    pub id: String,
    pub init_point: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentPayer {
    pub email: Option<String>,
}

/// The authoritative state of a payment, fetched by id. Webhook bodies can be stale or replayed, so this record,
/// not the notification, is the source of truth for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentDetails {
    pub id: u64,
    pub status: String,
    pub external_reference: Option<String>,
    #[serde(default)]
    pub payer: PaymentPayer,
}

#[cfg(test)]
mod test {
    use super::PaymentDetails;

    #[test]
    fn payment_details_with_missing_fields() {
        // The processor omits `payer` and `external_reference` for payments created outside this store.
        let payment: PaymentDetails = serde_json::from_str(r#"{"id": 123, "status": "approved"}"#).unwrap();
        assert_eq!(payment.id, 123);
        assert_eq!(payment.status, "approved");
        assert!(payment.external_reference.is_none());
        assert!(payment.payer.email.is_none());
    }

    #[test]
    fn payment_details_full() {
        let payment: PaymentDetails = serde_json::from_str(
            r#"{"id": 123, "status": "rejected", "external_reference": "15", "payer": {"email": "a@b.com"}}"#,
        )
        .unwrap();
        assert_eq!(payment.external_reference.as_deref(), Some("15"));
        assert_eq!(payment.payer.email.as_deref(), Some("a@b.com"));
    }
}
