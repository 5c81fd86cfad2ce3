mod api;
mod config;
mod data_objects;
mod error;

pub use api::BrevoApi;
pub use config::BrevoConfig;
pub use data_objects::{EmailAddress, SendSmtpEmail};
pub use error::BrevoApiError;
