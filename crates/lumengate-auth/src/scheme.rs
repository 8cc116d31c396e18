//! Credential schemes: how identities are stored and matched.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AuthError, Result};

type HmacSha256 = Hmac<Sha256>;

/// A deployment-wide secret combined with an identity under the keyed
/// scheme. Never stored per-record.
#[derive(Clone)]
pub struct Pepper(Vec<u8>);

impl Pepper {
    /// Wraps raw secret bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Reads the pepper from the process environment.
    ///
    /// A missing or empty variable is an error: the caller must treat it
    /// as startup-fatal rather than fall back to an insecure scheme.
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(Self(value.into_bytes())),
            _ => Err(AuthError::MissingPepper(var.to_string())),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Pepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pepper(..)")
    }
}

/// The active choice of how identities are stored and matched.
///
/// Exactly one scheme is selected at process start; a store never mixes
/// stored forms because each reader-type/scheme combination has its own
/// store file.
#[derive(Debug, Clone)]
pub enum CredentialScheme {
    /// Raw identity stored in the clear; exact equality lookup.
    Plain,
    /// Argon2id with a per-record salt; matching requires an O(n)
    /// verification scan (no index is possible over a salted hash).
    Adaptive,
    /// HMAC-SHA256 under a deployment-wide pepper; the digest is
    /// deterministic, so matching is an O(1) exact lookup.
    Keyed(Pepper),
}

impl CredentialScheme {
    /// Short name used in store file paths and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "none",
            Self::Adaptive => "adaptive",
            Self::Keyed(_) => "keyed",
        }
    }

    /// The forward transform: raw credential to stored form.
    pub fn seal(&self, raw: &str) -> Result<String> {
        match self {
            Self::Plain => Ok(raw.to_string()),
            Self::Adaptive => hash_adaptive(raw),
            Self::Keyed(pepper) => Ok(derive_keyed(pepper, raw)),
        }
    }

    /// The match rule against one stored value.
    pub fn verify(&self, raw: &str, stored: &str) -> bool {
        match self {
            Self::Plain => raw == stored,
            Self::Adaptive => verify_adaptive(raw, stored),
            Self::Keyed(pepper) => constant_time_eq(&derive_keyed(pepper, raw), stored),
        }
    }
}

/// True when a stored identifier carries the adaptive scheme's PHC form.
/// Used to recognize records that predate a switch to the keyed scheme.
pub fn looks_adaptive(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

/// Hash a raw credential with a fresh per-record salt.
pub(crate) fn hash_adaptive(raw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(e.to_string()))
}

/// Verify a raw credential against one stored PHC string.
pub(crate) fn verify_adaptive(raw: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}

/// Derive the keyed digest for a raw credential.
pub(crate) fn derive_keyed(pepper: &Pepper, raw: &str) -> String {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(pepper.as_bytes())
        .expect("HMAC key of any length");
    mac.update(raw.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pepper() -> Pepper {
        Pepper::new("festival-secret")
    }

    #[test]
    fn test_plain_roundtrip() {
        let scheme = CredentialScheme::Plain;
        let stored = scheme.seal("Eric").unwrap();
        assert_eq!(stored, "Eric");
        assert!(scheme.verify("Eric", &stored));
        assert!(!scheme.verify("Dana", &stored));
    }

    #[test]
    fn test_adaptive_roundtrip() {
        let scheme = CredentialScheme::Adaptive;
        let stored = scheme.seal("0006789abc").unwrap();
        assert!(looks_adaptive(&stored));
        assert!(scheme.verify("0006789abc", &stored));
        assert!(!scheme.verify("0006789abd", &stored));
    }

    #[test]
    fn test_adaptive_salts_are_unique() {
        let scheme = CredentialScheme::Adaptive;
        let a = scheme.seal("same-tag").unwrap();
        let b = scheme.seal("same-tag").unwrap();
        assert_ne!(a, b);
        assert!(scheme.verify("same-tag", &a));
        assert!(scheme.verify("same-tag", &b));
    }

    #[test]
    fn test_keyed_is_deterministic() {
        let scheme = CredentialScheme::Keyed(pepper());
        let a = scheme.seal("0006789abc").unwrap();
        let b = scheme.seal("0006789abc").unwrap();
        assert_eq!(a, b);
        assert!(!looks_adaptive(&a));
        assert!(scheme.verify("0006789abc", &a));
        assert!(!scheme.verify("0006789abd", &a));
    }

    #[test]
    fn test_keyed_depends_on_pepper() {
        let a = CredentialScheme::Keyed(Pepper::new("one")).seal("tag").unwrap();
        let b = CredentialScheme::Keyed(Pepper::new("two")).seal("tag").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pepper_from_env() {
        // Env vars are process-global; use distinct names per case.
        std::env::set_var("LUMENGATE_TEST_PEPPER_SET", "s3cret");
        assert!(Pepper::from_env("LUMENGATE_TEST_PEPPER_SET").is_ok());

        std::env::set_var("LUMENGATE_TEST_PEPPER_EMPTY", "");
        assert!(matches!(
            Pepper::from_env("LUMENGATE_TEST_PEPPER_EMPTY"),
            Err(AuthError::MissingPepper(_))
        ));

        assert!(matches!(
            Pepper::from_env("LUMENGATE_TEST_PEPPER_UNSET"),
            Err(AuthError::MissingPepper(_))
        ));
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!(CredentialScheme::Plain.name(), "none");
        assert_eq!(CredentialScheme::Adaptive.name(), "adaptive");
        assert_eq!(CredentialScheme::Keyed(pepper()).name(), "keyed");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: keyed digests are stable and always verify their own
        /// input.
        #[test]
        fn prop_keyed_roundtrip(identity in "[a-zA-Z0-9]{1,24}") {
            let scheme = CredentialScheme::Keyed(Pepper::new("prop-pepper"));
            let stored = scheme.seal(&identity).unwrap();
            prop_assert!(scheme.verify(&identity, &stored));
        }

        /// Property: distinct identities never collide under one pepper.
        #[test]
        fn prop_keyed_distinct(a in "[a-z0-9]{1,16}", b in "[a-z0-9]{1,16}") {
            prop_assume!(a != b);
            let scheme = CredentialScheme::Keyed(Pepper::new("prop-pepper"));
            prop_assert_ne!(scheme.seal(&a).unwrap(), scheme.seal(&b).unwrap());
        }

        /// Property: the keyed digest is 64 lowercase hex characters.
        #[test]
        fn prop_keyed_digest_format(identity in ".{1,32}") {
            let scheme = CredentialScheme::Keyed(Pepper::new("prop-pepper"));
            let stored = scheme.seal(&identity).unwrap();
            prop_assert_eq!(stored.len(), 64);
            prop_assert!(stored.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
