use std::fmt::Debug;

use log::*;
use mb_common::Cents;

use crate::{
    db_types::{NewOrder, Order},
    mbe_api::errors::CheckoutError,
    traits::{PaymentHandle, PaymentProvider, PreferenceLine, PreferenceSpec, RedirectTargets, ShopDatabase},
};

/// The smallest unit price the processor accepts. Zero or negative line prices are floored to this.
const MIN_UNIT_PRICE: Cents = Cents::new(1);

#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// The storefront base URL the buyer is sent back to after paying.
    pub storefront_url: String,
    /// Payer email used when the buyer did not supply one. The processor requires a syntactically valid address.
    pub default_payer_email: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            storefront_url: "https://loja-demo.com".to_string(),
            default_payer_email: "email_generico@loja.com".to_string(),
        }
    }
}

/// The result of a successful checkout: the pending order plus the processor handle the buyer is redirected to.
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub order: Order,
    pub preference_id: String,
    pub redirect_url: String,
}

/// `CheckoutApi` is the checkout orchestrator. It persists the pending order (with its line items, atomically) and
/// registers the matching payment preference with the processor.
pub struct CheckoutApi<B, P> {
    db: B,
    provider: P,
    settings: CheckoutSettings,
}

impl<B, P> Debug for CheckoutApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi")
    }
}

impl<B, P> CheckoutApi<B, P> {
    pub fn new(db: B, provider: P, settings: CheckoutSettings) -> Self {
        Self { db, provider, settings }
    }
}

impl<B, P> CheckoutApi<B, P>
where
    B: ShopDatabase,
    P: PaymentProvider,
{
    /// Creates a pending order for the given request and registers a payment preference for it.
    ///
    /// The order id is embedded in the preference as the external reference; it is the join key the webhook
    /// reconciler uses to find the order again when the payment resolves.
    ///
    /// ## Failure modes
    /// - An invalid request (no items, or a non-positive quantity) is rejected before anything is persisted.
    /// - A database failure aborts the checkout; no preference is created.
    /// - A provider failure after the insert leaves a dangling `Pending` order with no external reference. That is
    ///   deliberate: the order stays visible for manual reconciliation, and the error names it.
    pub async fn process_checkout(&self, order: NewOrder) -> Result<CheckoutSummary, CheckoutError> {
        validate(&order)?;
        let created = self.db.insert_order(&order).await?;
        debug!("🛒️ Order {} created with total {}", created.id, created.total);
        let spec = self.build_preference_spec(&order, &created);
        let PaymentHandle { preference_id, redirect_url } =
            self.provider.create_preference(&spec).await.map_err(|source| {
                error!(
                    "🛒️ Order {} was created but its payment preference failed: {source}. The order is left Pending \
                     without an external reference and needs manual reconciliation.",
                    created.id
                );
                CheckoutError::PaymentProvider { order_id: created.id, source }
            })?;
        debug!("🛒️ Preference {preference_id} created for order {}", created.id);
        Ok(CheckoutSummary { order: created, preference_id, redirect_url })
    }

    fn build_preference_spec(&self, order: &NewOrder, created: &Order) -> PreferenceSpec {
        let items = order
            .items
            .iter()
            .map(|item| {
                let title =
                    if item.product_name.trim().is_empty() { "Produto".to_string() } else { item.product_name.clone() };
                PreferenceLine {
                    product_id: item.product_id.map(|id| id.to_string()).unwrap_or_default(),
                    title,
                    quantity: item.quantity,
                    unit_price: item.price.max(MIN_UNIT_PRICE).to_reais(),
                }
            })
            .collect();
        let payer_email = order.buyer_email.clone().unwrap_or_else(|| self.settings.default_payer_email.clone());
        let base = self.settings.storefront_url.trim_end_matches('/');
        PreferenceSpec {
            items,
            payer_email,
            external_reference: created.id.value().to_string(),
            redirect_targets: RedirectTargets {
                success: format!("{base}/sucesso.html"),
                failure: format!("{base}/falha.html"),
                pending: format!("{base}/pendente.html"),
            },
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

fn validate(order: &NewOrder) -> Result<(), CheckoutError> {
    if order.items.is_empty() {
        return Err(CheckoutError::InvalidOrder("an order must have at least one item".to_string()));
    }
    if let Some(item) = order.items.iter().find(|i| i.quantity < 1) {
        return Err(CheckoutError::InvalidOrder(format!(
            "item '{}' has a non-positive quantity ({})",
            item.product_name, item.quantity
        )));
    }
    Ok(())
}
