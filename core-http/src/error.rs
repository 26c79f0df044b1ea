use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors raised while assembling an HTTP client factory.
///
/// Request-time failures are not wrapped; they surface as [`BridgeError`].
#[derive(Error, Debug)]
pub enum FactoryError {
    #[error(transparent)]
    Config(#[from] core_runtime::Error),

    #[error("Transport unavailable: {0}")]
    Transport(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, FactoryError>;
