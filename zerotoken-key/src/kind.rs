use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::KeyError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// JSON Web Signature (JWS) algorithm.
///
/// New algorithms are added here together with a matching [`Signer`][crate::Signer] and
/// [`Verifier`][crate::Verifier] implementation.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum JwsAlgorithm {
    /// No signature algorithm. This is the tag of a token that has not been signed yet.
    #[default]
    #[serde(rename = "none", alias = "None")]
    None,

    /// ECDSA using P-256 and SHA-256.
    #[serde(rename = "ES256")]
    ES256,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwsAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwsAlgorithm::None => write!(f, "none"),
            JwsAlgorithm::ES256 => write!(f, "ES256"),
        }
    }
}

impl FromStr for JwsAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "None" => Ok(JwsAlgorithm::None),
            "ES256" => Ok(JwsAlgorithm::ES256),
            s => Err(KeyError::UnsupportedJwsAlgName(s.to_string())),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
