//! Moda Bella payment engine
//!
//! This library contains the order/payment reconciliation core for the Moda Bella store backend. It is
//! HTTP-framework agnostic and split into three main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need to
//!    access the database directly. Instead, use the public API provided by the engine. The exception is the data
//!    types used in the database, which are defined in [`mod@db_types`] and are public.
//! 2. The backend traits ([`mod@traits`]). [`traits::ShopDatabase`] and [`traits::InventoryManagement`] define the
//!    persistence seam, while [`traits::PaymentProvider`] and [`traits::Mailer`] define the outbound seams to the
//!    payment processor and the transactional-email service. All four can be substituted with test doubles.
//! 3. The engine public API ([`mod@mbe_api`]): [`CheckoutApi`] creates the pending order and the payment preference,
//!    and [`OrderFlowApi`] reconciles asynchronous payment notifications, adjusting stock and dispatching the
//!    confirmation email exactly once per paid order.
pub mod db_types;
pub mod traits;

mod mbe_api;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "test_utils")]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use mbe_api::{
    checkout_api::{CheckoutApi, CheckoutSettings, CheckoutSummary},
    errors::{CheckoutError, OrderFlowError},
    order_flow_api::{OrderFlowApi, ReconcileOutcome},
};
