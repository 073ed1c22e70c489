use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use zerotoken_key::JwsAlgorithm;

use crate::{segment, JwtError, JwtResult};

//--------------------------------------------------------------------------------------------------
// Constant
//--------------------------------------------------------------------------------------------------

/// Defines the type of the token as a JSON Web Token (JWT).
pub const TYPE: &str = "JWT";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The header part of a token: the signing algorithm and the token type.
///
/// A header is never edited in place. Signing replaces it with one carrying the signer's algorithm.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct JwtHeader {
    alg: JwsAlgorithm,
    typ: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtHeader {
    /// Creates a header from its algorithm and type.
    pub fn new(alg: JwsAlgorithm, typ: impl Into<String>) -> Self {
        Self {
            alg,
            typ: typ.into(),
        }
    }

    /// Returns the algorithm used for signing the token.
    pub fn alg(&self) -> JwsAlgorithm {
        self.alg
    }

    /// Returns the token type.
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// Encodes the header as a compact-serialization segment.
    pub fn encode(&self) -> JwtResult<String> {
        segment::encode_json(self)
    }

    /// Returns a copy of this header with its algorithm replaced.
    pub fn with_alg(&self, alg: JwsAlgorithm) -> Self {
        Self {
            alg,
            typ: self.typ.clone(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwtHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = self.encode().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", encoded)
    }
}

impl FromStr for JwtHeader {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        segment::decode_json(&segment::decode_base64(s)?)
    }
}

impl Default for JwtHeader {
    fn default() -> Self {
        Self::new(JwsAlgorithm::None, TYPE)
    }
}

impl From<JwsAlgorithm> for JwtHeader {
    fn from(alg: JwsAlgorithm) -> Self {
        Self::new(alg, TYPE)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
