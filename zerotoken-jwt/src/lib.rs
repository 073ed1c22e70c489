#![warn(missing_docs)]
#![allow(clippy::module_inception)]

//! # Zerotoken JWT
//!
//! Scoped bearer tokens in the JWT compact serialization.
//!
//! A [`Token`] collects claims and scopes, is signed once with a [`Signer`][zerotoken_key::Signer]
//! and travels as `header.body.signature`, each segment unpadded base64url. Receivers [`parse`][Token::parse]
//! the compact form and check it with a [`Verifier`][zerotoken_key::Verifier]; interpreting the claims
//! (expiry, audience, ...) is left to the caller.

mod body;
mod error;
mod header;
mod segment;
mod signature;
mod token;
mod verifiers;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use body::*;
pub use error::*;
pub use header::*;
pub use signature::*;
pub use token::*;
pub use verifiers::*;
