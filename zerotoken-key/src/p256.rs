use std::borrow::Cow;

use p256::{
    ecdsa::{SigningKey, VerifyingKey},
    pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding},
};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::{
    AsymmetricKey, KeyPairBytes, KeyPairGenerate, KeyResult, PubKey, PublicKeyBytes,
    PublicKeyGenerate,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [`NIST P-256`][ref] public key.
///
/// [ref]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
pub type P256PubKey<'a> = PubKey<'a, VerifyingKey>;

/// A [`NIST P-256`][ref] key pair with a signing key.
///
/// [ref]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
pub type P256KeyPair<'a> = P256Key<'a, SigningKey>;

pub(crate) type P256Key<'a, S> = AsymmetricKey<'a, VerifyingKey, S>;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<S> P256Key<'_, S> {
    /// Returns the public half of the key, borrowing from `self`.
    pub fn public_key(&self) -> P256PubKey<'_> {
        P256PubKey {
            public: Cow::Borrowed(&*self.public),
            private: (),
        }
    }

    /// Encodes the public key as a PEM `PUBLIC KEY` block (SubjectPublicKeyInfo).
    pub fn to_public_key_pem(&self) -> KeyResult<String> {
        Ok(self.public.to_public_key_pem(LineEnding::LF)?)
    }
}

impl P256PubKey<'_> {
    /// Decodes a public key from a PEM `PUBLIC KEY` block (SubjectPublicKeyInfo).
    pub fn from_public_key_pem(pem: &str) -> KeyResult<P256PubKey<'static>> {
        Ok(P256PubKey {
            public: Cow::Owned(VerifyingKey::from_public_key_pem(pem)?),
            private: (),
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl PublicKeyGenerate for P256PubKey<'_> {
    /// Generates a public key from the given bytes from the [`Elliptic-Curve-Point-to-Octet-String` encoding][ref]
    /// described in SEC 1: Elliptic Curve Cryptography (Version 2.0).
    ///
    /// [ref]: http://www.secg.org/sec1-v2.pdf
    fn from_public_key(bytes: &[u8]) -> KeyResult<Self> {
        Ok(Self {
            public: Cow::Owned(VerifyingKey::from_sec1_bytes(bytes)?),
            private: (),
        })
    }
}

impl KeyPairGenerate for P256KeyPair<'_> {
    fn generate(rng: &mut impl CryptoRngCore) -> KeyResult<Self> {
        let signing_key = SigningKey::random(rng);
        Ok(Self {
            public: Cow::Owned(*signing_key.verifying_key()),
            private: signing_key,
        })
    }

    fn from_private_key(bytes: &[u8]) -> KeyResult<Self> {
        let signing_key = SigningKey::from_slice(bytes)?;
        Ok(Self {
            public: Cow::Owned(*signing_key.verifying_key()),
            private: signing_key,
        })
    }
}

impl<S> PublicKeyBytes for P256Key<'_, S> {
    /// Returns the public key bytes in the compressed [`Elliptic-Curve-Point-to-Octet-String` encoding][ref]
    /// described in SEC 1: Elliptic Curve Cryptography (Version 2.0).
    ///
    /// [ref]: http://www.secg.org/sec1-v2.pdf
    fn public_key_bytes(&self) -> Vec<u8> {
        self.public.to_encoded_point(true).as_bytes().to_vec()
    }
}

impl KeyPairBytes for P256KeyPair<'_> {
    fn private_key_bytes(&self) -> Vec<u8> {
        self.private.to_bytes().to_vec()
    }
}

impl<'a> From<P256KeyPair<'a>> for P256PubKey<'a> {
    fn from(key_pair: P256KeyPair<'a>) -> Self {
        Self {
            public: key_pair.public,
            private: (),
        }
    }
}

impl Serialize for P256PubKey<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.public_key_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for P256PubKey<'_> {
    fn deserialize<D>(deserializer: D) -> Result<P256PubKey<'static>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        P256PubKey::from_public_key(&bytes).map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p256_generate() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let key_pair = P256KeyPair::generate(&mut rng)?;

        let public_key_bytes = key_pair.public_key_bytes();
        let public_key = P256PubKey::from_public_key(&public_key_bytes)?;

        assert_eq!(P256PubKey::from(key_pair.clone()), public_key);

        let private_key_bytes = key_pair.private_key_bytes();
        assert_eq!(private_key_bytes.len(), 32);

        let restored = P256KeyPair::from_private_key(&private_key_bytes)?;
        assert_eq!(key_pair, restored);
        assert_eq!(key_pair.public_key(), public_key);

        Ok(())
    }

    #[test]
    fn test_p256_invalid_key_material() {
        assert!(P256KeyPair::from_private_key(&[0u8; 32]).is_err());
        assert!(P256KeyPair::from_private_key(&[1u8; 7]).is_err());
        assert!(P256PubKey::from_public_key(&[]).is_err());
    }

    #[test_log::test]
    fn test_p256_public_key_pem() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let key_pair = P256KeyPair::generate(&mut rng)?;

        let pem = key_pair.to_public_key_pem()?;
        tracing::debug!(%pem);
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
        assert!(pem.trim_end().ends_with("-----END PUBLIC KEY-----"));

        let decoded = P256PubKey::from_public_key_pem(&pem)?;
        assert_eq!(decoded, key_pair.public_key());

        assert!(P256PubKey::from_public_key_pem("not a pem").is_err());

        Ok(())
    }

    #[test_log::test]
    fn test_p256_pub_key_serde() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let pub_key = P256PubKey::from(P256KeyPair::generate(&mut rng)?);

        let serialized = serde_json::to_string(&pub_key)?;
        tracing::debug!(?serialized);
        let deserialized: P256PubKey = serde_json::from_str(&serialized)?;
        assert_eq!(pub_key, deserialized);

        Ok(())
    }
}
