use std::{fmt::Display, str::FromStr};

use serde_json::Value;
use zerotoken_key::{Signer, Verifier};

use crate::{segment, JwtBody, JwtError, JwtHeader, JwtResult, JwtSignature, VerifierSet};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A JWT carrying named claims and a list of scopes, optionally signed.
///
/// A token counts as signed as soon as it has a signature, whether or not that signature is
/// valid. Signing freezes the scopes; generic claims stay writable, and editing them on a signed
/// token leaves a signature that no longer verifies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Token {
    header: JwtHeader,
    body: JwtBody,
    signature: Option<JwtSignature>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Token {
    /// Creates an empty, unsigned token with the default header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a token from its individual components.
    pub fn from_parts(
        header: JwtHeader,
        body: JwtBody,
        signature: Option<impl Into<JwtSignature>>,
    ) -> Self {
        Self {
            header,
            body,
            signature: signature.map(Into::into),
        }
    }

    /// Parses a token from its compact serialization.
    ///
    /// The signature is not checked. See [`Token::verify`].
    pub fn parse(s: &str) -> JwtResult<Self> {
        let segments: Vec<&str> = s.split('.').collect();
        let [header, body, signature] = segments[..] else {
            return Err(JwtError::InvalidStructure(segments.len()));
        };

        // Every segment must be valid base64url before any of them is read as JSON.
        let header = segment::decode_base64(header)?;
        let body = segment::decode_base64(body)?;
        let signature: JwtSignature = signature.parse()?;

        let token = Self {
            header: segment::decode_json(&header)?,
            body: segment::decode_json(&body)?,
            signature: Some(signature),
        };

        tracing::debug!(alg = %token.header.alg(), "parsed token");

        Ok(token)
    }

    /// Returns the header.
    pub fn header(&self) -> &JwtHeader {
        &self.header
    }

    /// Returns the body.
    pub fn body(&self) -> &JwtBody {
        &self.body
    }

    /// Returns the signature, if any.
    pub fn signature(&self) -> Option<&JwtSignature> {
        self.signature.as_ref()
    }

    /// Returns `true` if the token carries a signature. This says nothing about its validity.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Adds or overwrites a claim. Ignored for the reserved scope claim.
    ///
    /// Not blocked on a signed token, but doing so invalidates the signature.
    pub fn add_claim(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if self.is_signed() {
            tracing::warn!(claim = %name, "adding claim to a signed token invalidates its signature");
        }

        self.body.insert(name, value);
    }

    /// Removes a claim. Ignored for the reserved scope claim.
    ///
    /// Not blocked on a signed token, but doing so invalidates the signature.
    pub fn remove_claim(&mut self, name: &str) {
        if self.is_signed() {
            tracing::warn!(claim = %name, "removing claim from a signed token invalidates its signature");
        }

        self.body.remove(name);
    }

    /// Returns the claim named `name`. Always `None` for the reserved scope claim.
    pub fn get_claim(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Returns the claim named `name` if it is a string.
    pub fn get_string_claim(&self, name: &str) -> Option<&str> {
        self.get_claim(name).and_then(Value::as_str)
    }

    /// Adds a scope after trimming surrounding whitespace. No-op once the token is signed.
    pub fn add_scope(&mut self, scope: &str) {
        if self.is_signed() {
            return;
        }

        self.body.push_scope(scope.trim());
    }

    /// Removes the first occurrence of a scope after trimming surrounding whitespace. No-op once
    /// the token is signed.
    ///
    /// The last scope takes the place of the removed one, so the order of the remaining scopes
    /// is not preserved.
    pub fn remove_scope(&mut self, scope: &str) {
        if self.is_signed() {
            return;
        }

        self.body.swap_remove_scope(scope.trim());
    }

    /// Returns `true` if the token has `scope`. The query is matched as is, without trimming.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.body.contains_scope(scope)
    }

    /// Returns the scopes in their current order.
    pub fn scopes(&self) -> &[String] {
        self.body.scopes()
    }

    /// Returns the signing input: `base64url(header).base64url(body)`.
    pub fn canonical_input(&self) -> JwtResult<String> {
        canonical_input(&self.header, &self.body)
    }

    /// Signs the token, replacing its header with one that names the signer's algorithm.
    ///
    /// Fails with [`JwtError::AlreadySigned`] if the token has a signature. On any error the
    /// token is left as it was.
    pub fn sign<S>(&mut self, signer: &S) -> JwtResult<()>
    where
        S: Signer + ?Sized,
    {
        if self.is_signed() {
            return Err(JwtError::AlreadySigned);
        }

        let header = self.header.with_alg(signer.algorithm());
        let input = canonical_input(&header, &self.body)?;
        let signature = signer.sign(&input)?;

        tracing::debug!(alg = %header.alg(), len = signature.len(), "signed token");

        self.header = header;
        self.signature = Some(signature.into());

        Ok(())
    }

    /// Checks the signature against the current header and body.
    ///
    /// Returns `false` for an unsigned token and never fails.
    pub fn verify<V>(&self, verifier: &V) -> bool
    where
        V: Verifier + ?Sized,
    {
        let Some(signature) = &self.signature else {
            return false;
        };

        let Ok(input) = self.canonical_input() else {
            return false;
        };

        let valid = verifier.verify(&input, signature);
        tracing::trace!(valid, alg = %self.header.alg(), "verified token");

        valid
    }

    /// Checks the signature with the verifier registered for the header's algorithm.
    ///
    /// Returns `false` if no verifier is registered for it.
    pub fn verify_with(&self, verifiers: &VerifierSet) -> bool {
        match verifiers.get(self.header.alg()) {
            Some(verifier) => self.verify(verifier),
            None => {
                tracing::trace!(alg = %self.header.alg(), "no verifier for algorithm");
                false
            }
        }
    }

    /// Encodes the token in its compact serialization. Unsigned tokens get an empty last segment.
    pub fn serialize(&self) -> JwtResult<String> {
        let input = self.canonical_input()?;
        Ok(match &self.signature {
            Some(signature) => format!("{}.{}", input, signature),
            None => format!("{}.", input),
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn canonical_input(header: &JwtHeader, body: &JwtBody) -> JwtResult<String> {
    Ok(format!("{}.{}", header.encode()?, body.encode()?))
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let serialized = self.serialize().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", serialized)
    }
}

impl FromStr for Token {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
