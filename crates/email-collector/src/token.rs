//! Signed tokens binding a customer's name and email to the shared secret.
//!
//! A token is `base64url(SHA-1("{name}:{email}:{secret}"))` with padding.
//! Fields are joined verbatim; there is no escaping of embedded colons.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Compute the token for `(name, email)` under `secret`.
pub fn sign(name: &str, email: &str, secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(name.as_bytes());
    hasher.update(b":");
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    URL_SAFE.encode(hasher.finalize())
}

/// Check `candidate` against the token for `(name, email)` in constant time.
pub fn verify(name: &str, email: &str, secret: &str, candidate: &str) -> bool {
    let expected = sign(name, email, secret);
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// Token codec holding the process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Arc<SecretString>,
}

impl TokenCodec {
    /// Create a codec keyed by `secret`.
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }

    /// Sign `(name, email)` with the configured secret.
    pub fn sign(&self, name: &str, email: &str) -> String {
        sign(name, email, self.secret.expose_secret())
    }

    /// Verify a caller-supplied token for `(name, email)`.
    pub fn verify(&self, name: &str, email: &str, candidate: &str) -> bool {
        verify(name, email, self.secret.expose_secret(), candidate)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(SecretString::new(secret.to_string()))
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign("test user", "test@email.com", "S");
        let b = sign("test user", "test@email.com", "S");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_known_vector() {
        // SHA-1("::") = f62e0ea6edbc4288ff84c8da24f410ecf986229d
        assert_eq!(sign("", "", ""), "9i4Opu28Qoj_hMjaJPQQ7PmGIp0=");
        assert_eq!(
            sign("test user", "test@email.com", "S"),
            "dcZtX1AuF797tAPkCnYvCfyCz08="
        );
    }

    #[test]
    fn test_token_format() {
        let token = sign("test user", "test@email.com", "S");

        // 20-byte digest in padded base64
        assert_eq!(token.len(), 28);
        assert!(token.ends_with('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_sign_is_sensitive_to_every_field() {
        let base = sign("test user", "test@email.com", "S");

        assert_ne!(base, sign("test user2", "test@email.com", "S"));
        assert_ne!(base, sign("test user", "test2@email.com", "S"));
        assert_ne!(base, sign("test user", "test@email.com", "T"));
    }

    #[test]
    fn test_sign_varied_inputs_do_not_collide() {
        let mut seen = std::collections::HashSet::new();
        for name in ["", "a", "alice", "Alice", "alice ", "ünïcødé"] {
            for email in ["", "a@b.c", "alice@example.com", "ALICE@example.com"] {
                for secret in ["", "s", "secret", "another secret"] {
                    assert!(seen.insert(sign(name, email, secret)));
                }
            }
        }
    }

    #[test]
    fn test_verify_accepts_own_signature() {
        let token = sign("test user", "test@email.com", "S");
        assert!(verify("test user", "test@email.com", "S", &token));
    }

    #[test]
    fn test_verify_rejects_other_candidates() {
        let token = sign("test user", "test@email.com", "S");

        assert!(!verify("test user", "test@email.com", "S", "a"));
        assert!(!verify("test user", "test@email.com", "S", ""));
        assert!(!verify("test user", "test@email.com", "S", &token[..27]));
        assert!(!verify("other user", "test@email.com", "S", &token));
        assert!(!verify("test user", "test@email.com", "wrong", &token));
    }

    #[test]
    fn test_codec_uses_injected_secret() {
        let codec = codec("S");
        let token = codec.sign("test user", "test@email.com");

        assert_eq!(token, sign("test user", "test@email.com", "S"));
        assert!(codec.verify("test user", "test@email.com", &token));
        assert!(!self::codec("T").verify("test user", "test@email.com", &token));
    }

    #[test]
    fn test_codec_debug_redacts_secret() {
        let debug = format!("{:?}", codec("super-secret"));
        assert!(!debug.contains("super-secret"));
    }
}
