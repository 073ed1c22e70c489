//! # Zerotoken Key
//!
//! Key material and signature algorithms used to sign and verify zerotoken JWTs.
//!
//! This crate currently only supports the following JWS algorithms:
//! - `ES256` (ECDSA over NIST P-256 with SHA-256)

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod error;
mod es256;
mod key;
mod kind;
mod p256;
mod traits;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use error::*;
pub use es256::*;
pub use key::*;
pub use kind::*;
pub use p256::*;
pub use traits::*;
