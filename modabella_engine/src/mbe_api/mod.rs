pub mod checkout_api;
pub mod errors;
pub mod order_flow_api;
