//! Profile resolution under the active credential scheme.

use lumengate_store::ProfileStore;
use lumengate_types::{Profile, Scan};

use crate::error::{AuthError, Result};
use crate::scheme::{derive_keyed, looks_adaptive, verify_adaptive, CredentialScheme};

/// Result of an authentication attempt.
///
/// Migration is an explicit outcome rather than a hidden store mutation,
/// so the matching logic stays testable against a read-only store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A stored profile matched.
    Match(Profile),
    /// A profile enrolled under the adaptive scheme matched while the
    /// keyed scheme is active; its identifier should be rewritten to
    /// `new_identifier` so the next lookup takes the O(1) path.
    MatchRequiresMigration {
        /// The matched profile, still carrying its old identifier.
        profile: Profile,
        /// The keyed digest to store in its place.
        new_identifier: String,
    },
    /// No stored profile matched. Indistinguishable from an empty store;
    /// the caller offers enrollment.
    NoMatch,
}

/// Decides whether a submitted identity (and optional secondary key)
/// matches a stored profile.
#[derive(Debug, Clone)]
pub struct Authenticator {
    scheme: CredentialScheme,
}

impl Authenticator {
    /// Creates an authenticator for the active scheme.
    pub fn new(scheme: CredentialScheme) -> Self {
        Self { scheme }
    }

    /// The active scheme.
    pub fn scheme(&self) -> &CredentialScheme {
        &self.scheme
    }

    /// Matches `identity` (and `key`, when the candidate record stores a
    /// secondary credential) against the store. Read-only; a required
    /// migration is reported in the outcome.
    pub fn authenticate<S: ProfileStore>(
        &self,
        store: &S,
        identity: &str,
        key: Option<&str>,
    ) -> Result<AuthOutcome> {
        if identity.is_empty() {
            return Err(AuthError::InvalidInput("identity must be non-empty".into()));
        }

        let (candidate, migration) = self.match_primary(store, identity);
        let Some(profile) = candidate else {
            tracing::debug!(scheme = self.scheme.name(), "No matching profile");
            return Ok(AuthOutcome::NoMatch);
        };

        // Secondary credential is checked only after the primary
        // identifier matched.
        if let Some(stored_key) = profile.secondary_credential.as_deref() {
            let Some(key) = key else {
                tracing::debug!(
                    display_name = %profile.display_name,
                    "Profile requires a secondary key but the scan has none"
                );
                return Ok(AuthOutcome::NoMatch);
            };
            if !self.verify_secondary(key, stored_key) {
                tracing::debug!(
                    display_name = %profile.display_name,
                    "Secondary key mismatch"
                );
                return Ok(AuthOutcome::NoMatch);
            }
        }

        Ok(match migration {
            Some(new_identifier) => AuthOutcome::MatchRequiresMigration {
                profile,
                new_identifier,
            },
            None => AuthOutcome::Match(profile),
        })
    }

    /// Authenticates a scan and applies any required migration to the
    /// store. Returns the matched profile with its current identifier.
    pub fn resolve<S: ProfileStore>(&self, store: &mut S, scan: &Scan) -> Result<Option<Profile>> {
        match self.authenticate(store, &scan.identity, scan.key.as_deref())? {
            AuthOutcome::Match(profile) => Ok(Some(profile)),
            AuthOutcome::MatchRequiresMigration {
                mut profile,
                new_identifier,
            } => {
                store.update_identifier(&profile.identifier, &new_identifier)?;
                tracing::info!(
                    display_name = %profile.display_name,
                    "Migrated stored identifier to the keyed form"
                );
                profile.identifier = new_identifier;
                Ok(Some(profile))
            }
            AuthOutcome::NoMatch => Ok(None),
        }
    }

    fn match_primary<S: ProfileStore>(
        &self,
        store: &S,
        identity: &str,
    ) -> (Option<Profile>, Option<String>) {
        match &self.scheme {
            CredentialScheme::Plain => (store.find_by_identifier(identity).cloned(), None),
            CredentialScheme::Adaptive => (
                store
                    .all()
                    .iter()
                    .find(|p| verify_adaptive(identity, &p.identifier))
                    .cloned(),
                None,
            ),
            CredentialScheme::Keyed(pepper) => {
                let digest = derive_keyed(pepper, identity);
                if let Some(profile) = store.find_by_identifier(&digest) {
                    return (Some(profile.clone()), None);
                }
                // Records enrolled before the switch to the keyed scheme
                // still carry adaptive hashes; a verification scan finds
                // them and flags the lazy one-way migration.
                let legacy = store
                    .all()
                    .iter()
                    .find(|p| {
                        looks_adaptive(&p.identifier) && verify_adaptive(identity, &p.identifier)
                    })
                    .cloned();
                match legacy {
                    Some(profile) => (Some(profile), Some(digest)),
                    None => (None, None),
                }
            }
        }
    }

    fn verify_secondary(&self, raw: &str, stored: &str) -> bool {
        // A record migrated from the adaptive era keeps its adaptive-form
        // secondary credential; only the identifier is rewritten.
        if matches!(self.scheme, CredentialScheme::Keyed(_)) && looks_adaptive(stored) {
            return verify_adaptive(raw, stored);
        }
        self.scheme.verify(raw, stored)
    }
}
