use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{segment, JwtError, JwtResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The claim name reserved for the token's scopes.
pub const SCOPE_CLAIM: &str = "scope";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Named claims of a token, excluding its scopes.
pub type Claims = BTreeMap<String, Value>;

/// The body part of a token.
///
/// Generic claims and scopes are kept apart. On the wire the scopes are emitted under the
/// reserved [`SCOPE_CLAIM`] name as an array of strings, but the claim accessors never see them.
///
/// The encoded JSON lists the claims in key order followed by `scope`, and leaves `scope` out
/// entirely when there are no scopes. Verification re-encodes the body, so a token from an issuer
/// that lays the body out differently (for example a claim such as `sub` sorted after `scope`,
/// or an explicit `"scope":[]`) parses fine but does not verify.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JwtBody {
    #[serde(flatten)]
    claims: Claims,

    #[serde(rename = "scope", default, skip_serializing_if = "Vec::is_empty")]
    scopes: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtBody {
    /// Encodes the body as a compact-serialization segment.
    pub fn encode(&self) -> JwtResult<String> {
        segment::encode_json(self)
    }

    /// Returns the generic claims.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Returns the scopes in their current order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the claim named `name`. Always `None` for the scope claim.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if name == SCOPE_CLAIM {
            return None;
        }

        self.claims.get(name)
    }

    /// Inserts or overwrites a claim. Ignored for the scope claim.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if name == SCOPE_CLAIM {
            return;
        }

        self.claims.insert(name, value.into());
    }

    /// Removes a claim, returning its value. Ignored for the scope claim.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        if name == SCOPE_CLAIM {
            return None;
        }

        self.claims.remove(name)
    }

    /// Appends a scope. Duplicates are kept.
    pub fn push_scope(&mut self, scope: impl Into<String>) {
        self.scopes.push(scope.into());
    }

    /// Removes the first occurrence of `scope`, moving the last scope into its slot.
    pub fn swap_remove_scope(&mut self, scope: &str) -> bool {
        match self.scopes.iter().position(|s| s == scope) {
            Some(index) => {
                self.scopes.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `scope` is present.
    pub fn contains_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwtBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = self.encode().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", encoded)
    }
}

impl FromStr for JwtBody {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        segment::decode_json(&segment::decode_base64(s)?)
    }
}

impl FromIterator<(String, Value)> for JwtBody {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut body = JwtBody::default();
        for (name, value) in iter {
            body.insert(name, value);
        }

        body
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test_log::test]
    fn test_body_serde() -> anyhow::Result<()> {
        let mut body = JwtBody::default();
        body.insert("iss", "Test Issuer");
        body.push_scope("user:create");
        body.push_scope("user:delete");

        let serialized = serde_json::to_string(&body)?;
        tracing::debug!(?serialized);
        assert_eq!(
            serialized,
            r#"{"iss":"Test Issuer","scope":["user:create","user:delete"]}"#
        );

        let deserialized: JwtBody = serde_json::from_str(&serialized)?;
        assert_eq!(deserialized, body);
        assert_eq!(deserialized.scopes(), ["user:create", "user:delete"]);
        assert!(deserialized.get(SCOPE_CLAIM).is_none());
        assert!(!deserialized.claims().contains_key(SCOPE_CLAIM));

        Ok(())
    }

    #[test]
    fn test_body_without_scopes_omits_scope_claim() -> anyhow::Result<()> {
        let body = JwtBody::default();
        assert_eq!(serde_json::to_string(&body)?, "{}");
        assert_eq!(body.to_string(), "e30");

        Ok(())
    }

    #[test]
    fn test_body_encoding_layout() -> anyhow::Result<()> {
        let mut body = JwtBody::default();
        body.insert("sub", "y");
        body.insert("iss", "x");
        body.push_scope("a");
        assert_eq!(
            serde_json::to_string(&body)?,
            r#"{"iss":"x","sub":"y","scope":["a"]}"#
        );

        let sorted: JwtBody = serde_json::from_str(r#"{"iss":"x","scope":["a"],"sub":"y"}"#)?;
        assert_eq!(sorted, body);
        assert_ne!(
            serde_json::to_string(&sorted)?,
            r#"{"iss":"x","scope":["a"],"sub":"y"}"#
        );

        let emptied: JwtBody = serde_json::from_str(r#"{"scope":[]}"#)?;
        assert!(emptied.scopes().is_empty());
        assert_eq!(serde_json::to_string(&emptied)?, "{}");

        Ok(())
    }

    #[test]
    fn test_body_keeps_nested_values() -> anyhow::Result<()> {
        let mut body = JwtBody::default();
        body.insert("exp", 86400);
        body.insert("admin", true);
        body.insert("nothing", Value::Null);
        body.insert("ratio", 0.5);
        body.insert("aud", json!(["a", "b"]));
        body.insert("ctx", json!({ "tenant": { "id": 7 } }));

        let decoded: JwtBody = body.to_string().parse()?;
        assert_eq!(decoded, body);
        assert_eq!(decoded.get("ctx"), Some(&json!({ "tenant": { "id": 7 } })));

        Ok(())
    }

    #[test]
    fn test_body_rejects_malformed_scope_claim() {
        assert!(serde_json::from_str::<JwtBody>(r#"{"scope":"user:read"}"#).is_err());
        assert!(serde_json::from_str::<JwtBody>(r#"{"scope":[1,2]}"#).is_err());
        assert!(serde_json::from_str::<JwtBody>(r#"[]"#).is_err());
    }

    #[test]
    fn test_body_swap_remove_scope() {
        let mut body = JwtBody::default();
        for scope in ["a", "b", "c", "b"] {
            body.push_scope(scope);
        }

        assert!(body.swap_remove_scope("a"));
        assert_eq!(body.scopes(), ["b", "b", "c"]);

        assert!(body.swap_remove_scope("b"));
        assert_eq!(body.scopes(), ["c", "b"]);

        assert!(!body.swap_remove_scope("z"));
        assert_eq!(body.scopes(), ["c", "b"]);
    }

    #[test]
    fn test_body_reserved_claim_is_guarded() {
        let mut body = JwtBody::default();
        body.push_scope("user:read");

        body.insert(SCOPE_CLAIM, json!(["user:write"]));
        assert!(body.remove(SCOPE_CLAIM).is_none());
        assert!(body.get(SCOPE_CLAIM).is_none());
        assert!(body.claims().is_empty());
        assert_eq!(body.scopes(), ["user:read"]);
    }
}
