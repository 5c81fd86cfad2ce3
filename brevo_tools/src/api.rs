use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::{
    config::BrevoConfig,
    data_objects::{EmailAddress, SendSmtpEmail},
    BrevoApiError,
};

#[derive(Clone)]
pub struct BrevoApi {
    config: BrevoConfig,
    client: Arc<Client>,
}

impl BrevoApi {
    pub fn new(config: BrevoConfig) -> Result<Self, BrevoApiError> {
        if config.api_key.is_unset() {
            warn!("The Brevo API key is empty. Confirmation emails will not be delivered.");
        }
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| BrevoApiError::Initialization(e.to_string()))?;
        headers.insert("api-key", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrevoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn send_email(&self, email: &SendSmtpEmail) -> Result<(), BrevoApiError> {
        let url = format!("{}/v3/smtp/email", self.config.base_url);
        trace!("Sending transactional email via {url}");
        let response = self.client.post(url).json(email).send().await?;
        if response.status().is_success() {
            debug!("Transactional email accepted by Brevo");
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| BrevoApiError::RestResponseError(e.to_string()))?;
            Err(BrevoApiError::DeliveryError { status, message })
        }
    }

    /// Composes and sends the fixed order-confirmation template to the buyer.
    pub async fn send_order_confirmation(&self, recipient: &str, order_id: i64) -> Result<(), BrevoApiError> {
        let subject = format!("[Pedido #{order_id}] Recebemos seu pagamento!");
        let html_content = format!(
            "<html><body>\
             <h1>Obrigado por sua compra!</h1>\
             <p>Seu pedido #{order_id} foi confirmado e está sendo processado.</p>\
             <p>Em breve você receberá mais informações sobre o envio.</p>\
             </body></html>"
        );
        let sender = EmailAddress::new(self.config.sender_email.clone()).with_name(self.config.sender_name.clone());
        let email = SendSmtpEmail { sender, to: vec![EmailAddress::new(recipient)], subject, html_content };
        self.send_email(&email).await?;
        info!("Confirmation email for order #{order_id} sent to {recipient}");
        Ok(())
    }
}
