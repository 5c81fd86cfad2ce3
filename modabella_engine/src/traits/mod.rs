//! The behaviour contracts the engine is built against.
//!
//! [`ShopDatabase`] and [`InventoryManagement`] are implemented by persistence backends (see
//! [`crate::SqliteDatabase`]). [`PaymentProvider`] and [`Mailer`] are implemented by adapters over the external
//! service clients, and by test doubles in the test suites.
mod mailer;
mod payment_provider;
mod shop_database;

pub use mailer::{Mailer, MailerError};
pub use payment_provider::{
    PaymentHandle,
    PaymentProvider,
    PaymentProviderError,
    PaymentState,
    PreferenceLine,
    PreferenceSpec,
    RedirectTargets,
};
pub use shop_database::{InventoryManagement, SettleOrderResult, ShopDatabase, ShopDatabaseError};
