use log::*;
use mb_common::Secret;

pub const DEFAULT_MP_BASE_URL: &str = "https://api.mercadopago.com";

#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    /// The API base URL. Overridable so tests can point the client at a local stub server.
    pub base_url: String,
    pub access_token: Secret<String>,
    /// Request timeout in seconds for all calls to the processor.
    pub timeout_secs: u64,
}

impl Default for MercadoPagoConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_MP_BASE_URL.to_string(), access_token: Secret::default(), timeout_secs: 10 }
    }
}

impl MercadoPagoConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("MB_MP_BASE_URL").unwrap_or_else(|_| DEFAULT_MP_BASE_URL.to_string());
        let access_token = Secret::new(std::env::var("MB_MP_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("MB_MP_ACCESS_TOKEN not set. Calls to Mercado Pago will be rejected.");
            String::default()
        }));
        let timeout_secs = std::env::var("MB_MP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);
        Self { base_url, access_token, timeout_secs }
    }
}
