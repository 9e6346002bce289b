//! Secret bundle wire model and packed-bundle grammar.
//!
//! The service returns one JSON object carrying both envelope layers: the
//! project key pre-packed as `iv:tag:ciphertext`, and the secrets layer as
//! three separate fields that are reassembled into the same packed form
//! before decryption.

use serde::Deserialize;

use crate::error::DecryptError;

/// AES-GCM nonce size in bytes (96 bits).
pub const IV_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Response body of `GET /api/secrets/token`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretBundle {
    /// Layer-1 ciphertext: the project key, packed as `iv:tag:ciphertext`.
    pub encrypted_project_key: String,
    /// Layer-2 ciphertext and its authentication material.
    pub secrets: SecretsPayload,
}

/// Second-layer ciphertext components, supplied separately on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretsPayload {
    pub ciphertext: String,
    pub iv: String,
    pub auth_tag: String,
}

impl SecretsPayload {
    /// Reassemble the packed form, `iv:authTag:ciphertext` in that fixed
    /// order, so both layers go through the same grammar.
    pub fn to_packed(&self) -> String {
        format!("{}:{}:{}", self.iv, self.auth_tag, self.ciphertext)
    }
}

/// A parsed packed bundle: IV, authentication tag, and ciphertext.
#[derive(Debug, Clone)]
pub struct PackedBundle {
    pub iv: Vec<u8>,
    pub tag: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl PackedBundle {
    /// Parse the `<iv-hex>:<tag-hex>:<ciphertext-hex>` grammar.
    ///
    /// The grammar admits exactly three non-empty hex components; the IV
    /// must decode to 12 bytes and the tag to 16. Anything else is a
    /// structural failure, reported as `MalformedBundle` so it is never
    /// mistaken for a key mismatch.
    ///
    /// # Errors
    ///
    /// Returns `DecryptError::MalformedBundle` describing the first
    /// structural problem found.
    pub fn parse(packed: &str) -> Result<Self, DecryptError> {
        let parts: Vec<&str> = packed.split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(DecryptError::MalformedBundle(format!(
                "expected 3 colon-delimited components, found {}",
                parts.iter().filter(|p| !p.is_empty()).count()
            )));
        }

        let iv = decode_component(parts[0], "iv")?;
        let tag = decode_component(parts[1], "auth tag")?;
        let ciphertext = decode_component(parts[2], "ciphertext")?;

        if iv.len() != IV_SIZE {
            return Err(DecryptError::MalformedBundle(format!(
                "iv must be {} bytes, found {}",
                IV_SIZE,
                iv.len()
            )));
        }
        if tag.len() != TAG_SIZE {
            return Err(DecryptError::MalformedBundle(format!(
                "auth tag must be {} bytes, found {}",
                TAG_SIZE,
                tag.len()
            )));
        }

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }
}

fn decode_component(component: &str, name: &str) -> Result<Vec<u8>, DecryptError> {
    hex::decode(component)
        .map_err(|_| DecryptError::MalformedBundle(format!("{} is not valid hex", name)))
}
