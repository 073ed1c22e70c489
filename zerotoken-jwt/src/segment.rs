//! The codec shared by every segment of the compact serialization: JSON, then unpadded base64url.

use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use serde::{de::DeserializeOwned, Serialize};

use crate::JwtResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

pub(crate) fn encode_base64(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

pub(crate) fn decode_base64(segment: &str) -> JwtResult<Vec<u8>> {
    Ok(BASE64_URL_SAFE_NO_PAD.decode(segment.as_bytes())?)
}

pub(crate) fn encode_json(value: &impl Serialize) -> JwtResult<String> {
    let json = serde_json::to_vec(value)?;
    Ok(encode_base64(&json))
}

pub(crate) fn decode_json<T>(bytes: &[u8]) -> JwtResult<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_slice(bytes)?)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
