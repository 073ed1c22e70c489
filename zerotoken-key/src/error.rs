//! Error types of the zerotoken-key crate.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;

/// Defines the types of errors that can occur in key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Ecdsa errors, raised by invalid key material or a failed signing operation.
    #[error("Ecdsa error: {0}")]
    EcdsaError(#[from] p256::ecdsa::Error),

    /// Pem or SPKI encoding errors.
    #[error("Public key encoding error: {0}")]
    PublicKeyEncodingError(#[from] p256::pkcs8::spki::Error),

    /// Unsupported JWS algorithm name.
    #[error("Unsupported JWS algorithm name: {0}")]
    UnsupportedJwsAlgName(String),

    /// The random source failed to produce bytes.
    #[error("Random source error: {0}")]
    RandomSourceError(#[from] rand_core::Error),

    /// The lock guarding the random source was poisoned by a panicking signer.
    #[error("Random source unavailable: lock poisoned")]
    RandomSourceUnavailable,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `KeyResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> KeyResult<T> {
    Result::Ok(value)
}
