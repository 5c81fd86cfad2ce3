use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::MercadoPagoConfig,
    data_objects::{PaymentDetails, Preference, PreferenceRequest},
    MercadoPagoApiError,
};

#[derive(Clone)]
pub struct MercadoPagoApi {
    config: MercadoPagoConfig,
    client: Arc<Client>,
}

impl MercadoPagoApi {
    pub fn new(config: MercadoPagoConfig) -> Result<Self, MercadoPagoApiError> {
        if config.access_token.is_unset() {
            warn!("The Mercado Pago access token is empty. Calls to the processor will be rejected.");
        }
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.access_token.reveal());
        let val = HeaderValue::from_str(&bearer).map_err(|e| MercadoPagoApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MercadoPagoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, MercadoPagoApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| MercadoPagoApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| MercadoPagoApiError::RestResponseError(e.to_string()))?;
            Err(MercadoPagoApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Creates a checkout preference for the given request. The returned `init_point` is where the buyer goes to pay.
    pub async fn create_preference(&self, request: &PreferenceRequest) -> Result<Preference, MercadoPagoApiError> {
        debug!("Creating payment preference for order {}", request.external_reference);
        let preference =
            self.rest_query::<Preference, _>(Method::POST, "/checkout/preferences", Some(request)).await?;
        info!("Created payment preference {} for order {}", preference.id, request.external_reference);
        Ok(preference)
    }

    /// Fetches the current, authoritative state of a payment by id.
    pub async fn get_payment(&self, payment_id: u64) -> Result<PaymentDetails, MercadoPagoApiError> {
        let path = format!("/v1/payments/{payment_id}");
        debug!("Fetching payment #{payment_id}");
        let payment = self.rest_query::<PaymentDetails, ()>(Method::GET, &path, None).await?;
        debug!("Fetched payment #{payment_id} with status {}", payment.status);
        Ok(payment)
    }
}
