use std::sync::Mutex;

use p256::ecdsa::{
    signature::{DigestVerifier, RandomizedDigestSigner},
    Signature,
};
use rand_core::{CryptoRng, CryptoRngCore, OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{JwsAlgorithm, KeyError, KeyResult, P256KeyPair, P256PubKey, Signer, Verifier};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Length of a raw `ES256` signature: `r` and `s` as 32-byte big-endian integers, concatenated.
pub const ES256_SIGNATURE_LEN: usize = 64;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Signs tokens with `ES256`: ECDSA over NIST P-256 on the SHA-256 digest of the signing input.
///
/// Signatures are randomized with `R`, which defaults to the operating system's CSPRNG. The
/// produced bytes are the fixed-width `r || s` encoding, not ASN.1 DER.
#[derive(Debug)]
pub struct Es256Signer<R = OsRng> {
    key_pair: P256KeyPair<'static>,
    rng: Mutex<R>,
}

/// Records failures of the wrapped random source, which the ECDSA backend reads through the
/// infallible `fill_bytes`.
struct CheckedRng<'a, R> {
    inner: &'a mut R,
    error: Option<rand_core::Error>,
}

/// Verifies `ES256` signatures produced by [`Es256Signer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Es256Verifier {
    public_key: P256PubKey<'static>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Es256Signer {
    /// Creates a signer that draws its randomness from the operating system.
    pub fn new(key_pair: P256KeyPair<'static>) -> Self {
        Self::with_rng(key_pair, OsRng)
    }
}

impl<R> Es256Signer<R>
where
    R: CryptoRngCore,
{
    /// Creates a signer that draws its randomness from `rng`.
    pub fn with_rng(key_pair: P256KeyPair<'static>, rng: R) -> Self {
        Self {
            key_pair,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the key pair used for signing.
    pub fn key_pair(&self) -> &P256KeyPair<'static> {
        &self.key_pair
    }

    /// Returns a verifier for the public half of this signer's key pair.
    pub fn verifier(&self) -> Es256Verifier {
        Es256Verifier::new(self.key_pair.public_key().into_owned())
    }
}

impl Es256Verifier {
    /// Creates a verifier for the given public key.
    pub fn new(public_key: P256PubKey<'static>) -> Self {
        Self { public_key }
    }

    /// Returns the public key signatures are checked against.
    pub fn public_key(&self) -> &P256PubKey<'static> {
        &self.public_key
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<R> Signer for Es256Signer<R>
where
    R: CryptoRngCore,
{
    fn algorithm(&self) -> JwsAlgorithm {
        JwsAlgorithm::ES256
    }

    fn sign(&self, canonical_input: &str) -> KeyResult<Vec<u8>> {
        let digest = Sha256::new_with_prefix(canonical_input.as_bytes());
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| KeyError::RandomSourceUnavailable)?;

        let mut checked = CheckedRng {
            inner: &mut *rng,
            error: None,
        };

        let signature: Signature = self
            .key_pair
            .private
            .try_sign_digest_with_rng(&mut checked, digest)?;

        if let Some(error) = checked.error {
            return Err(error.into());
        }

        // `to_bytes` zero-pads both scalars to the field width.
        Ok(signature.to_bytes().to_vec())
    }
}

impl Verifier for Es256Verifier {
    fn verify(&self, canonical_input: &str, signature: &[u8]) -> bool {
        if signature.len() != ES256_SIGNATURE_LEN {
            tracing::trace!(len = signature.len(), "rejecting es256 signature of wrong length");
            return false;
        }

        // Fails on zero or out-of-range scalars.
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };

        let digest = Sha256::new_with_prefix(canonical_input.as_bytes());
        self.public_key
            .public
            .verify_digest(digest, &signature)
            .is_ok()
    }
}

impl<R> RngCore for CheckedRng<'_, R>
where
    R: CryptoRngCore,
{
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(error) = self.inner.try_fill_bytes(dest) {
            self.error.get_or_insert(error);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl<R> CryptoRng for CheckedRng<'_, R> where R: CryptoRngCore {}

impl From<P256PubKey<'static>> for Es256Verifier {
    fn from(public_key: P256PubKey<'static>) -> Self {
        Self::new(public_key)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::KeyPairGenerate;

    use super::*;

    const INPUT: &str = "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9.eyJpc3MiOiJUZXN0IElzc3VlciJ9";

    /// A random source that is always exhausted.
    struct ExhaustedRng;

    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0)
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new("exhausted"))
        }
    }

    impl CryptoRng for ExhaustedRng {}

    fn new_signer() -> anyhow::Result<Es256Signer> {
        let mut rng = rand::thread_rng();
        Ok(Es256Signer::new(P256KeyPair::generate(&mut rng)?))
    }

    #[test]
    fn test_es256_sign_and_verify() -> anyhow::Result<()> {
        let signer = new_signer()?;
        let verifier = signer.verifier();

        assert_eq!(signer.algorithm(), JwsAlgorithm::ES256);

        let signature = signer.sign(INPUT)?;
        assert_eq!(signature.len(), ES256_SIGNATURE_LEN);
        assert!(verifier.verify(INPUT, &signature));
        assert!(!verifier.verify(&format!("{INPUT}x"), &signature));

        Ok(())
    }

    #[test]
    fn test_es256_signatures_are_fixed_width_raw_scalars() -> anyhow::Result<()> {
        let signer = new_signer()?;

        for _ in 0..16 {
            let bytes = signer.sign(INPUT)?;
            assert_eq!(bytes.len(), ES256_SIGNATURE_LEN);

            let signature = Signature::from_slice(&bytes)?;
            let (r, s) = signature.split_bytes();
            assert_eq!(&bytes[..32], r.as_slice());
            assert_eq!(&bytes[32..], s.as_slice());
        }

        Ok(())
    }

    #[test]
    fn test_es256_verify_rejects_malformed_signatures() -> anyhow::Result<()> {
        let signer = new_signer()?;
        let verifier = signer.verifier();
        let signature = signer.sign(INPUT)?;

        assert!(!verifier.verify(INPUT, &[]));
        assert!(!verifier.verify(INPUT, &signature[..63]));
        assert!(!verifier.verify(INPUT, &[signature.as_slice(), &[0]].concat()));
        assert!(!verifier.verify(INPUT, &[0u8; 64]));
        assert!(!verifier.verify(INPUT, &[0xff; 64]));

        let der = Signature::from_slice(&signature)?.to_der();
        assert!(!verifier.verify(INPUT, der.as_bytes()));

        let mut tampered = signature.clone();
        tampered[40] ^= 0x01;
        assert!(!verifier.verify(INPUT, &tampered));

        Ok(())
    }

    #[test]
    fn test_es256_verify_rejects_other_key() -> anyhow::Result<()> {
        let signer = new_signer()?;
        let other = new_signer()?;

        let signature = signer.sign(INPUT)?;
        assert!(!other.verifier().verify(INPUT, &signature));

        Ok(())
    }

    #[test]
    fn test_es256_sign_fails_on_exhausted_rng() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let signer = Es256Signer::with_rng(P256KeyPair::generate(&mut rng)?, ExhaustedRng);

        assert!(matches!(
            signer.sign(INPUT),
            Err(KeyError::RandomSourceError(_))
        ));

        Ok(())
    }

    #[test]
    fn test_es256_verifier_from_pem() -> anyhow::Result<()> {
        let signer = new_signer()?;
        let pem = signer.key_pair().to_public_key_pem()?;

        let verifier = Es256Verifier::from(P256PubKey::from_public_key_pem(&pem)?);
        assert_eq!(&verifier, &signer.verifier());
        assert!(verifier.verify(INPUT, &signer.sign(INPUT)?));

        Ok(())
    }
}
