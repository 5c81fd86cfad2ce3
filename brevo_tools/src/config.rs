use log::*;
use mb_common::Secret;

pub const DEFAULT_BREVO_BASE_URL: &str = "https://api.brevo.com";

#[derive(Debug, Clone)]
pub struct BrevoConfig {
    /// The API base URL. Overridable so tests can point the client at a local stub server.
    pub base_url: String,
    pub api_key: Secret<String>,
    pub sender_name: String,
    pub sender_email: String,
    pub timeout_secs: u64,
}

impl Default for BrevoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BREVO_BASE_URL.to_string(),
            api_key: Secret::default(),
            sender_name: "Moda Bella".to_string(),
            sender_email: "no-reply@loja.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl BrevoConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("MB_BREVO_BASE_URL").unwrap_or_else(|_| DEFAULT_BREVO_BASE_URL.to_string());
        let api_key = Secret::new(std::env::var("MB_BREVO_API_KEY").unwrap_or_else(|_| {
            warn!("MB_BREVO_API_KEY not set. Confirmation emails will not be delivered.");
            String::default()
        }));
        let sender_name = std::env::var("MB_BREVO_SENDER_NAME").unwrap_or_else(|_| "Moda Bella".to_string());
        let sender_email = std::env::var("MB_BREVO_SENDER_EMAIL").unwrap_or_else(|_| "no-reply@loja.com".to_string());
        let timeout_secs = std::env::var("MB_BREVO_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);
        Self { base_url, api_key, sender_name, sender_email, timeout_secs }
    }
}
