use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrevoApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The request to Brevo timed out: {0}")]
    Timeout(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Email delivery failed. Error {status}. {message}")]
    DeliveryError { status: u16, message: String },
}

impl From<reqwest::Error> for BrevoApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BrevoApiError::Timeout(e.to_string())
        } else {
            BrevoApiError::RestResponseError(e.to_string())
        }
    }
}
