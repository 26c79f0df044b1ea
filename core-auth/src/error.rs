use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credential {field}: {reason}")]
    InvalidCredential { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, AuthError>;
