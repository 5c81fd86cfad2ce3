use brevo_tools::BrevoApi;
use modabella_engine::{
    db_types::OrderId,
    traits::{Mailer, MailerError},
};

/// [`Mailer`] implementation backed by the Brevo transactional-email client.
#[derive(Clone)]
pub struct BrevoMailer {
    api: BrevoApi,
}

impl BrevoMailer {
    pub fn new(api: BrevoApi) -> Self {
        Self { api }
    }
}

impl Mailer for BrevoMailer {
    async fn send_order_confirmation(&self, recipient: &str, order_id: OrderId) -> Result<(), MailerError> {
        self.api.send_order_confirmation(recipient, order_id.value()).await.map_err(|e| MailerError(e.to_string()))
    }
}
