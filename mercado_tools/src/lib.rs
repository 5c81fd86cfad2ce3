mod api;
mod config;
mod error;

mod data_objects;

pub use api::MercadoPagoApi;
pub use config::MercadoPagoConfig;
pub use data_objects::{
    BackUrls,
    Payer,
    PaymentDetails,
    PaymentPayer,
    Preference,
    PreferenceItem,
    PreferenceRequest,
};
pub use error::MercadoPagoApiError;
