//! Test support utilities for warren integration tests.
//!
//! The library only ever decrypts, so the encrypt side of the envelope
//! scheme lives here: these helpers play the role of the secrets service,
//! wrapping plaintext into the same two-layer bundle the real service
//! returns.

#![allow(dead_code)]

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::RngCore;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use warren::core::envelope::derive_key;

/// Encrypt one layer into the packed `iv:tag:ciphertext` hex form.
pub fn encrypt_layer(plaintext: &[u8], secret: &[u8]) -> String {
    let key = derive_key(secret);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));

    let mut iv = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut iv);

    let mut buf = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buf)
        .expect("encryption cannot fail");

    format!(
        "{}:{}:{}",
        hex::encode(iv),
        hex::encode(tag),
        hex::encode(buf)
    )
}

/// Build the JSON response body for a correctly encrypted two-layer bundle.
pub fn bundle_json(plaintext: &str, project_key: &[u8], token_secret: &str) -> Value {
    let packed = encrypt_layer(plaintext.as_bytes(), project_key);
    let parts: Vec<&str> = packed.split(':').collect();

    json!({
        "encryptedProjectKey": encrypt_layer(project_key, token_secret.as_bytes()),
        "secrets": {
            "iv": parts[0],
            "authTag": parts[1],
            "ciphertext": parts[2],
        }
    })
}

/// Start a mock secrets service answering the fetch for `token` with `body`.
pub async fn mock_service(token: &str, body: Value) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secrets/token"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    server
}
