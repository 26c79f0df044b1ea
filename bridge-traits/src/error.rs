use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Request cancelled: {0}")]
    Cancelled(String),
}

impl BridgeError {
    /// Whether the failure came from the request's cancellation signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BridgeError::Cancelled(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
