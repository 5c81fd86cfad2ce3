use thiserror::Error;

#[derive(Debug, Error)]
pub enum MercadoPagoApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The request to Mercado Pago timed out: {0}")]
    Timeout(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl MercadoPagoApiError {
    /// Timeouts are worth retrying; a definitive rejection from the processor is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MercadoPagoApiError::Timeout(_))
    }
}

impl From<reqwest::Error> for MercadoPagoApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MercadoPagoApiError::Timeout(e.to_string())
        } else {
            MercadoPagoApiError::RestResponseError(e.to_string())
        }
    }
}
