//! Error types of the zerotoken-jwt crate.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for token operations.
pub type JwtResult<T> = Result<T, JwtError>;

/// Defines the types of errors that can occur in token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The compact form does not have exactly three dot-separated segments.
    #[error("Invalid token structure: expected 3 segments, found {0}")]
    InvalidStructure(usize),

    /// Base64 decoding errors
    #[error("Base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Json (de)serialization errors
    #[error("Json serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The token already carries a signature and cannot be signed again.
    #[error("Token is already signed")]
    AlreadySigned,

    /// Key errors, raised by the signing backend.
    #[error("Key error: {0}")]
    KeyError(#[from] zerotoken_key::KeyError),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `JwtResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> JwtResult<T> {
    Result::Ok(value)
}
