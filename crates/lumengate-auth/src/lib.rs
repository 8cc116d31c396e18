//! Profile authentication and enrollment for Lumengate.
//!
//! This crate decides whether a submitted identity (and optional
//! secondary key) matches a stored profile, under exactly one of three
//! credential schemes selected at process start:
//!
//! - **Plain**: raw identity stored in the clear, exact equality lookup
//! - **Adaptive**: argon2id with a per-record salt, O(n) verification
//!   scan per lookup
//! - **Keyed**: HMAC-SHA256 under a deployment-wide pepper, O(1) exact
//!   lookup
//!
//! When the keyed scheme is active, records left over from the adaptive
//! era are matched by a fallback scan and lazily migrated to the keyed
//! form on their next successful authentication.
//!
//! # Example
//!
//! ```
//! use lumengate_auth::{enroll, Authenticator, CredentialScheme, EnrollmentRequest, Pepper};
//! use lumengate_store::MemoryStore;
//! use lumengate_types::{EffectCatalog, Scan};
//!
//! let scheme = CredentialScheme::Keyed(Pepper::new("deployment-secret"));
//! let mut store = MemoryStore::new();
//!
//! let request = EnrollmentRequest {
//!     display_name: "Eric".to_string(),
//!     effect_name: "blue".to_string(),
//! };
//! enroll(&scheme, &mut store, &Scan::new("tag-42"), &request, &EffectCatalog::short()).unwrap();
//!
//! let auth = Authenticator::new(scheme);
//! let profile = auth.resolve(&mut store, &Scan::new("tag-42")).unwrap().unwrap();
//! assert_eq!(profile.effect_name, "blue");
//! ```

mod authenticator;
mod enroll;
mod error;
mod scheme;

pub use authenticator::{AuthOutcome, Authenticator};
pub use enroll::{enroll, EnrollmentRequest};
pub use error::{AuthError, Result};
pub use scheme::{looks_adaptive, CredentialScheme, Pepper};
