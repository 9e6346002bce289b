//! Access token parsing.
//!
//! A warren token has the shape `<identifier>.<secret>`. The identifier
//! routes the request to the right project on the server; the secret half
//! stays local and is only ever fed into key derivation. The two-component
//! invariant is enforced at parse time, before any network or crypto work.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::error::TokenError;

/// A parsed access token.
///
/// The secret half lives in a zeroizing buffer and is wiped when the token
/// is dropped. `Debug` output redacts it.
#[derive(Clone)]
pub struct AccessToken {
    identifier: String,
    secret: Zeroizing<String>,
}

impl AccessToken {
    /// The routable project/service identifier (the part before the dot).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The local secret material used to derive the layer-1 key.
    ///
    /// Never log or transmit this outside the `Authorization` header.
    pub fn secret_material(&self) -> &str {
        &self.secret
    }

    /// The full token string for the `Authorization: Bearer` header.
    pub fn bearer(&self) -> String {
        format!("{}.{}", self.identifier, self.secret.as_str())
    }
}

impl FromStr for AccessToken {
    type Err = TokenError;

    /// Parse a raw token string.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidFormat` unless the input contains
    /// exactly one `.` with non-empty text on both sides.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(secret), None) if !id.is_empty() && !secret.is_empty() => {
                Ok(Self {
                    identifier: id.to_string(),
                    secret: Zeroizing::new(secret.to_string()),
                })
            }
            _ => Err(TokenError::InvalidFormat),
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_component_token() {
        let token: AccessToken = "proj_42.s3cr3t".parse().unwrap();
        assert_eq!(token.identifier(), "proj_42");
        assert_eq!(token.secret_material(), "s3cr3t");
        assert_eq!(token.bearer(), "proj_42.s3cr3t");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            "nodothere".parse::<AccessToken>(),
            Err(TokenError::InvalidFormat)
        ));
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(".secret".parse::<AccessToken>().is_err());
        assert!("id.".parse::<AccessToken>().is_err());
        assert!(".".parse::<AccessToken>().is_err());
        assert!("".parse::<AccessToken>().is_err());
    }

    #[test]
    fn rejects_extra_separators() {
        assert!(matches!(
            "a.b.c".parse::<AccessToken>(),
            Err(TokenError::InvalidFormat)
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let token: AccessToken = "proj_42.s3cr3t".parse().unwrap();
        let dump = format!("{:?}", token);
        assert!(dump.contains("proj_42"));
        assert!(!dump.contains("s3cr3t"));
    }
}
