use rand_core::CryptoRngCore;

use crate::{JwsAlgorithm, KeyResult};

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// A signing capability for a single JWS algorithm.
///
/// Implementations must always return signatures of the same length for their algorithm, but the
/// signature bytes themselves may differ between calls on the same input.
pub trait Signer {
    /// Returns the algorithm this signer implements.
    fn algorithm(&self) -> JwsAlgorithm;

    /// Produces the raw signature bytes over the canonical signing input of a token.
    fn sign(&self, canonical_input: &str) -> KeyResult<Vec<u8>>;
}

/// A verification capability for a single JWS algorithm.
pub trait Verifier {
    /// Checks `signature` against the canonical signing input of a token.
    ///
    /// Never fails. Malformed signatures are reported as `false`.
    fn verify(&self, canonical_input: &str, signature: &[u8]) -> bool;
}

/// A trait for constructing a public key.
pub trait PublicKeyGenerate {
    /// Generates a public key from its bytes.
    fn from_public_key(bytes: &[u8]) -> KeyResult<Self>
    where
        Self: Sized;
}

/// A trait for constructing a key pair.
pub trait KeyPairGenerate {
    /// Generates a key pair from a cryptographically secure random number generator.
    fn generate(rng: &mut impl CryptoRngCore) -> KeyResult<Self>
    where
        Self: Sized;

    /// Constructs a key pair from its private key bytes.
    fn from_private_key(bytes: &[u8]) -> KeyResult<Self>
    where
        Self: Sized;
}

/// A trait for getting the public key bytes.
pub trait PublicKeyBytes {
    /// Returns the public key bytes.
    fn public_key_bytes(&self) -> Vec<u8>;
}

/// A trait for getting the key pair bytes.
pub trait KeyPairBytes: PublicKeyBytes {
    /// Returns the private key bytes.
    fn private_key_bytes(&self) -> Vec<u8>;
}
