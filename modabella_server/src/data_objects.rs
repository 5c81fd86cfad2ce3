use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One line of an incoming checkout request. Prices arrive as decimal reais, the unit the storefront works in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    /// Storefronts are sloppy about this field: it can be a number, a numeric string, `"undefined"`, `"null"`,
    /// empty or absent, and arrives under either `id` or `product_id`. Anything that is not a usable id is
    /// coerced to `None`.
    #[serde(default, alias = "id", deserialize_with = "lenient_id")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    pub total: f64,
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub order_id: i64,
    /// Where the buyer goes to pay.
    pub init_point: String,
}

/// The body of a Mercado Pago webhook notification. Everything is optional: the processor sends several
/// notification families to the same endpoint and only `type == "payment"` ones carry a payment id we care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookNotification {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<WebhookData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookData {
    /// The payment id, which the processor sends as a JSON number or a string depending on the notification path.
    #[serde(default, deserialize_with = "lenient_payment_id")]
    pub id: Option<u64>,
}

impl WebhookNotification {
    pub fn is_payment(&self) -> bool {
        self.kind.as_deref() == Some("payment")
    }

    pub fn payment_id(&self) -> Option<u64> {
        self.data.as_ref().and_then(|d| d.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.as_ref().and_then(coerce_number))
}

fn lenient_payment_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.as_ref().and_then(coerce_number).and_then(|id| u64::try_from(id).ok()))
}

fn coerce_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("undefined") || s.eq_ignore_ascii_case("null") {
                None
            } else {
                s.parse().ok()
            }
        },
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn user_id_coercion() {
        let req: CheckoutRequest =
            serde_json::from_str(r#"{"user_id": "undefined", "total": 19.9, "items": [{"name": "Bolsa", "price": 19.9}]}"#)
                .unwrap();
        assert_eq!(req.user_id, None);
        assert_eq!(req.items[0].quantity, 1);

        let req: CheckoutRequest =
            serde_json::from_str(r#"{"user_id": "42", "total": 19.9, "items": [{"id": 1, "name": "Bolsa", "price": 19.9}]}"#)
                .unwrap();
        assert_eq!(req.user_id, Some(42));
        assert_eq!(req.items[0].product_id, Some(1));
    }

    #[test]
    fn webhook_id_as_string_or_number() {
        let n: WebhookNotification = serde_json::from_str(r#"{"type": "payment", "data": {"id": 123}}"#).unwrap();
        assert!(n.is_payment());
        assert_eq!(n.payment_id(), Some(123));

        let n: WebhookNotification = serde_json::from_str(r#"{"type": "payment", "data": {"id": "123"}}"#).unwrap();
        assert_eq!(n.payment_id(), Some(123));

        let n: WebhookNotification = serde_json::from_str(r#"{"type": "plan", "data": {"id": "abc"}}"#).unwrap();
        assert!(!n.is_payment());
        assert_eq!(n.payment_id(), None);
    }
}
