use std::env;

use brevo_tools::BrevoConfig;
use log::*;
use mercado_tools::MercadoPagoConfig;
use modabella_engine::CheckoutSettings;

const DEFAULT_MB_HOST: &str = "127.0.0.1";
const DEFAULT_MB_PORT: u16 = 3000;
const DEFAULT_MB_DATABASE_URL: &str = "sqlite://data/modabella_store.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Payment processor client configuration.
    pub mercado_pago: MercadoPagoConfig,
    /// Transactional email client configuration.
    pub brevo: BrevoConfig,
    /// Storefront URL and payer-email fallback used when building payment preferences.
    pub checkout: CheckoutSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MB_HOST.to_string(),
            port: DEFAULT_MB_PORT,
            database_url: DEFAULT_MB_DATABASE_URL.to_string(),
            mercado_pago: MercadoPagoConfig::default(),
            brevo: BrevoConfig::default(),
            checkout: CheckoutSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MB_HOST").ok().unwrap_or_else(|| DEFAULT_MB_HOST.into());
        let port = env::var("MB_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for MB_PORT. {e} Using the default, {DEFAULT_MB_PORT}, instead.");
                    DEFAULT_MB_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MB_PORT);
        let database_url = env::var("MB_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ MB_DATABASE_URL is not set. Using the default, {DEFAULT_MB_DATABASE_URL}.");
            DEFAULT_MB_DATABASE_URL.into()
        });
        let defaults = CheckoutSettings::default();
        let checkout = CheckoutSettings {
            storefront_url: env::var("MB_STOREFRONT_URL").ok().unwrap_or(defaults.storefront_url),
            default_payer_email: env::var("MB_DEFAULT_PAYER_EMAIL").ok().unwrap_or(defaults.default_payer_email),
        };
        Self {
            host,
            port,
            database_url,
            mercado_pago: MercadoPagoConfig::new_from_env_or_default(),
            brevo: BrevoConfig::new_from_env_or_default(),
            checkout,
        }
    }
}
