//! Two-layer envelope decryption.
//!
//! A single bearer token yields two independent AES-256 keys. The token's
//! secret half derives the layer-1 key, which recovers the project key;
//! the project key is itself the layer-2 secret, recovering the plaintext
//! secret definitions. The service only ever stores the project key
//! encrypted per-token, so revoking a token means re-encrypting one small
//! wrapper, never the secrets themselves.
//!
//! Every layer is authenticated: the GCM tag is verified before any
//! plaintext leaves this module, and a failed layer aborts the pipeline.

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Key, Nonce, Tag,
};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::bundle::{PackedBundle, SecretBundle};
use crate::error::DecryptError;

/// Symmetric key size in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Derive the symmetric key for a layer: `SHA-256(secret)`.
///
/// Deterministic with no inputs besides the secret material, which is why
/// that material must never be persisted or transmitted beyond the fetch.
pub fn derive_key(secret: &[u8]) -> Zeroizing<[u8; KEY_SIZE]> {
    let digest = Sha256::digest(secret);
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    key.copy_from_slice(digest.as_slice());
    key
}

/// Decrypt one packed layer with a key derived from `secret`.
///
/// Parses the `iv:tag:ciphertext` grammar, derives the key, and performs
/// an AES-256-GCM decryption with detached-tag verification. Decryption is
/// all-or-nothing: on tag mismatch no plaintext byte is surfaced.
///
/// # Errors
///
/// Returns `DecryptError::MalformedBundle` for structural failures and
/// `DecryptError::AuthenticationFailed` when the tag does not verify.
pub fn decrypt_layer(packed: &str, secret: &[u8]) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
    let bundle = PackedBundle::parse(packed)?;
    trace!(ciphertext_len = bundle.ciphertext.len(), "layer parsed");

    let key = derive_key(secret);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let nonce = Nonce::from_slice(&bundle.iv);
    let tag = Tag::from_slice(&bundle.tag);

    // Buffer holds ciphertext going in and plaintext coming out; either
    // way it is wiped on drop.
    let mut buf = Zeroizing::new(bundle.ciphertext);
    cipher
        .decrypt_in_place_detached(nonce, b"", buf.as_mut_slice(), tag)
        .map_err(|_| DecryptError::AuthenticationFailed)?;

    Ok(buf)
}

/// Unwrap the full two-layer envelope.
///
/// Layer 1 decrypts the packed project key with the token's secret
/// material; its plaintext is raw key material, not text. Layer 2
/// reassembles `iv:authTag:ciphertext` from the separately supplied
/// components and decrypts with the project key. Layer 2 is never
/// attempted if layer 1 fails.
///
/// # Errors
///
/// Propagates the first `DecryptError` encountered; additionally returns
/// `DecryptError::NotUtf8` if the final plaintext is not valid UTF-8.
pub fn unwrap(
    bundle: &SecretBundle,
    token_secret: &str,
) -> Result<Zeroizing<String>, DecryptError> {
    let project_key = decrypt_layer(&bundle.encrypted_project_key, token_secret.as_bytes())?;
    debug!("project key layer verified");

    let packed = bundle.secrets.to_packed();
    let plaintext = decrypt_layer(&packed, &project_key)?;
    debug!(plaintext_len = plaintext.len(), "secrets layer verified");

    let text = std::str::from_utf8(&plaintext).map_err(|_| DecryptError::NotUtf8)?;
    Ok(Zeroizing::new(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bundle::{SecretsPayload, IV_SIZE};
    use proptest::prelude::*;
    use rand::RngCore;

    /// Encrypt-side counterpart of `decrypt_layer`, mirroring what the
    /// service does when it wraps a layer for this client.
    fn encrypt_layer(plaintext: &[u8], secret: &[u8]) -> String {
        let key = derive_key(secret);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));

        let mut iv = [0u8; IV_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let mut buf = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buf)
            .unwrap();

        format!(
            "{}:{}:{}",
            hex::encode(iv),
            hex::encode(tag),
            hex::encode(buf)
        )
    }

    fn wrap(plaintext: &str, project_key: &[u8], token_secret: &str) -> SecretBundle {
        let packed = encrypt_layer(plaintext.as_bytes(), project_key);
        let parts: Vec<&str> = packed.split(':').collect();
        SecretBundle {
            encrypted_project_key: encrypt_layer(project_key, token_secret.as_bytes()),
            secrets: SecretsPayload {
                iv: parts[0].to_string(),
                auth_tag: parts[1].to_string(),
                ciphertext: parts[2].to_string(),
            },
        }
    }

    #[test]
    fn derive_key_is_deterministic() {
        assert_eq!(
            derive_key(b"s3cr3t").as_slice(),
            derive_key(b"s3cr3t").as_slice()
        );
        assert_ne!(
            derive_key(b"s3cr3t").as_slice(),
            derive_key(b"other").as_slice()
        );
    }

    #[test]
    fn single_layer_roundtrip() {
        let packed = encrypt_layer(b"hello envelope", b"secret");
        let plaintext = decrypt_layer(&packed, b"secret").unwrap();
        assert_eq!(plaintext.as_slice(), b"hello envelope");
    }

    #[test]
    fn wrong_secret_is_authentication_failure() {
        let packed = encrypt_layer(b"hello", b"secret");
        let err = decrypt_layer(&packed, b"wrong").unwrap_err();
        assert!(matches!(err, DecryptError::AuthenticationFailed));
    }

    #[test]
    fn two_layer_unwrap_recovers_plaintext() {
        let bundle = wrap("API_KEY=abc123\nPORT=8080", b"project key bytes", "s3cr3t");
        let text = unwrap(&bundle, "s3cr3t").unwrap();
        assert_eq!(text.as_str(), "API_KEY=abc123\nPORT=8080");
    }

    #[test]
    fn flipped_tag_bit_fails_layer_one() {
        let mut bundle = wrap("X=1", b"pk", "s3cr3t");
        let mut parts: Vec<String> = bundle
            .encrypted_project_key
            .split(':')
            .map(String::from)
            .collect();
        let mut tag = hex::decode(&parts[1]).unwrap();
        tag[0] ^= 0x01;
        parts[1] = hex::encode(tag);
        bundle.encrypted_project_key = parts.join(":");

        let err = unwrap(&bundle, "s3cr3t").unwrap_err();
        assert!(matches!(err, DecryptError::AuthenticationFailed));
    }

    #[test]
    fn flipped_tag_bit_fails_layer_two() {
        let mut bundle = wrap("X=1", b"pk", "s3cr3t");
        let mut tag = hex::decode(&bundle.secrets.auth_tag).unwrap();
        tag[0] ^= 0x01;
        bundle.secrets.auth_tag = hex::encode(tag);

        let err = unwrap(&bundle, "s3cr3t").unwrap_err();
        assert!(matches!(err, DecryptError::AuthenticationFailed));
    }

    #[test]
    fn layer_two_under_different_key_fails() {
        // Layer 1 decrypts fine, but the secrets layer was encrypted with
        // a key other than the recovered project key.
        let mut bundle = wrap("X=1", b"project-key-a", "s3cr3t");
        let other = encrypt_layer(b"X=1", b"project-key-b");
        let parts: Vec<&str> = other.split(':').collect();
        bundle.secrets = SecretsPayload {
            iv: parts[0].to_string(),
            auth_tag: parts[1].to_string(),
            ciphertext: parts[2].to_string(),
        };

        let err = unwrap(&bundle, "s3cr3t").unwrap_err();
        assert!(matches!(err, DecryptError::AuthenticationFailed));
    }

    #[test]
    fn malformed_project_key_bundle_skips_layer_two() {
        let mut bundle = wrap("X=1", b"pk", "s3cr3t");
        bundle.encrypted_project_key = "onlyone".to_string();
        let err = unwrap(&bundle, "s3cr3t").unwrap_err();
        assert!(matches!(err, DecryptError::MalformedBundle(_)));
    }

    #[test]
    fn non_utf8_secrets_layer_is_rejected() {
        let bundle = wrap("", b"pk", "s3cr3t");
        let packed = encrypt_layer(&[0xff, 0xfe, 0x00], b"pk");
        let parts: Vec<&str> = packed.split(':').collect();
        let bundle = SecretBundle {
            encrypted_project_key: bundle.encrypted_project_key,
            secrets: SecretsPayload {
                iv: parts[0].to_string(),
                auth_tag: parts[1].to_string(),
                ciphertext: parts[2].to_string(),
            },
        };
        let err = unwrap(&bundle, "s3cr3t").unwrap_err();
        assert!(matches!(err, DecryptError::NotUtf8));
    }

    proptest! {
        #[test]
        fn prop_layer_roundtrip(
            plaintext in proptest::collection::vec(any::<u8>(), 0..4096),
            secret in ".{1,64}",
        ) {
            let packed = encrypt_layer(&plaintext, secret.as_bytes());
            let decrypted = decrypt_layer(&packed, secret.as_bytes()).unwrap();
            prop_assert_eq!(plaintext, decrypted.to_vec());
        }

        #[test]
        fn prop_tampered_ciphertext_never_decrypts(
            plaintext in proptest::collection::vec(any::<u8>(), 1..1024),
            tamper_idx in 0usize..1024usize,
        ) {
            let packed = encrypt_layer(&plaintext, b"secret");
            let parts: Vec<&str> = packed.split(':').collect();
            let mut ciphertext = hex::decode(parts[2]).unwrap();
            let idx = tamper_idx % ciphertext.len();
            ciphertext[idx] ^= 0xFF;
            let tampered = format!("{}:{}:{}", parts[0], parts[1], hex::encode(ciphertext));

            let result = decrypt_layer(&tampered, b"secret");
            prop_assert!(matches!(result, Err(DecryptError::AuthenticationFailed)));
        }

        #[test]
        fn prop_unwrap_roundtrip(text in "[ -~]{0,512}") {
            let bundle = wrap(&text, b"some project key", "tok-secret");
            let recovered = unwrap(&bundle, "tok-secret").unwrap();
            prop_assert_eq!(text, recovered.as_str());
        }
    }
}
