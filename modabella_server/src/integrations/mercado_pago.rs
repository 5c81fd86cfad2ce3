use mercado_tools::{
    BackUrls,
    MercadoPagoApi,
    MercadoPagoApiError,
    Payer,
    PaymentDetails,
    Preference,
    PreferenceItem,
    PreferenceRequest,
};
use modabella_engine::{
    db_types::PaymentEvent,
    traits::{PaymentHandle, PaymentProvider, PaymentProviderError, PaymentState, PreferenceSpec},
};

/// [`PaymentProvider`] implementation backed by the Mercado Pago REST client.
#[derive(Clone)]
pub struct MercadoPagoGateway {
    api: MercadoPagoApi,
}

impl MercadoPagoGateway {
    pub fn new(api: MercadoPagoApi) -> Self {
        Self { api }
    }
}

impl PaymentProvider for MercadoPagoGateway {
    async fn create_preference(&self, spec: &PreferenceSpec) -> Result<PaymentHandle, PaymentProviderError> {
        let request = preference_request_from_spec(spec);
        let Preference { id, init_point } = self.api.create_preference(&request).await.map_err(map_gateway_error)?;
        Ok(PaymentHandle { preference_id: id, redirect_url: init_point })
    }

    async fn payment_state(&self, payment_id: u64) -> Result<PaymentState, PaymentProviderError> {
        let details = self.api.get_payment(payment_id).await.map_err(map_gateway_error)?;
        Ok(payment_state_from_details(details))
    }
}

fn preference_request_from_spec(spec: &PreferenceSpec) -> PreferenceRequest {
    let items = spec
        .items
        .iter()
        .map(|line| PreferenceItem {
            id: line.product_id.clone(),
            title: line.title.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect();
    PreferenceRequest {
        items,
        payer: Payer { email: spec.payer_email.clone() },
        external_reference: spec.external_reference.clone(),
        back_urls: BackUrls {
            success: spec.redirect_targets.success.clone(),
            failure: spec.redirect_targets.failure.clone(),
            pending: spec.redirect_targets.pending.clone(),
        },
        auto_return: "approved".to_string(),
    }
}

fn payment_state_from_details(details: PaymentDetails) -> PaymentState {
    PaymentState {
        payment_id: details.id,
        status: PaymentEvent::from(details.status.as_str()),
        external_reference: details.external_reference,
        payer_email: details.payer.email,
    }
}

fn map_gateway_error(e: MercadoPagoApiError) -> PaymentProviderError {
    if e.is_retryable() {
        PaymentProviderError::Timeout(e.to_string())
    } else {
        PaymentProviderError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod test {
    use mercado_tools::{PaymentDetails, PaymentPayer};
    use modabella_engine::{
        db_types::PaymentEvent,
        traits::{PreferenceLine, PreferenceSpec, RedirectTargets},
    };

    use super::{payment_state_from_details, preference_request_from_spec};

    #[test]
    fn spec_maps_onto_the_wire_format() {
        let spec = PreferenceSpec {
            items: vec![PreferenceLine {
                product_id: "7".to_string(),
                title: "Vestido Floral".to_string(),
                quantity: 2,
                unit_price: 19.90,
            }],
            payer_email: "cliente@exemplo.com".to_string(),
            external_reference: "15".to_string(),
            redirect_targets: RedirectTargets {
                success: "https://loja.com/sucesso.html".to_string(),
                failure: "https://loja.com/falha.html".to_string(),
                pending: "https://loja.com/pendente.html".to_string(),
            },
        };
        let request = preference_request_from_spec(&spec);
        assert_eq!(request.external_reference, "15");
        assert_eq!(request.auto_return, "approved");
        assert_eq!(request.items[0].unit_price, 19.90);
        assert_eq!(request.back_urls.success, "https://loja.com/sucesso.html");
    }

    #[test]
    fn payment_details_map_onto_engine_state() {
        let details = PaymentDetails {
            id: 555,
            status: "approved".to_string(),
            external_reference: Some("15".to_string()),
            payer: PaymentPayer { email: Some("cliente@exemplo.com".to_string()) },
        };
        let state = payment_state_from_details(details);
        assert_eq!(state.payment_id, 555);
        assert_eq!(state.status, PaymentEvent::Approved);
        assert_eq!(state.external_reference.as_deref(), Some("15"));
        assert_eq!(state.payer_email.as_deref(), Some("cliente@exemplo.com"));
    }
}
