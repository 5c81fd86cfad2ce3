//! Adapters that plug the real outbound clients into the engine's seams.
pub mod brevo;
pub mod mercado_pago;

pub use brevo::BrevoMailer;
pub use mercado_pago::MercadoPagoGateway;
