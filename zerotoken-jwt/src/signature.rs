use std::{fmt::Display, ops::Deref, str::FromStr};

use crate::{segment, JwtError};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The raw signature bytes of a token.
///
/// The bytes are whatever the [`Signer`][zerotoken_key::Signer] produced and may be empty for a
/// parsed token. Having a signature says nothing about its validity.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct JwtSignature(Vec<u8>);

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtSignature {
    /// Returns the raw bytes of the signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Converts the signature into a vector of bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwtSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", segment::encode_base64(&self.0))
    }
}

impl FromStr for JwtSignature {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JwtSignature(segment::decode_base64(s)?))
    }
}

impl From<Vec<u8>> for JwtSignature {
    fn from(signature: Vec<u8>) -> Self {
        Self(signature)
    }
}

impl From<JwtSignature> for Vec<u8> {
    fn from(signature: JwtSignature) -> Self {
        signature.0
    }
}

impl Deref for JwtSignature {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
