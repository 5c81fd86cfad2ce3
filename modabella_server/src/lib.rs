//! # Moda Bella server
//! This crate hosts the HTTP surface of the Moda Bella store backend. It is responsible for:
//! * Accepting checkout requests from the storefront and handing them to the engine.
//! * Listening for incoming payment webhook notifications from Mercado Pago and feeding them into the reconciler.
//! * Wiring the engine's outbound seams to the real Mercado Pago and Brevo clients.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `GET /health`: A health check route that returns a 200 OK response.
//! * `POST /api/checkout`: Creates a pending order and its payment preference.
//! * `POST /api/payment/webhook`: The webhook route for payment notifications. Always answers 200.
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
