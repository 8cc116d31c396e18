//! Profile creation after a failed lookup.

use lumengate_store::ProfileStore;
use lumengate_types::{EffectCatalog, Profile, Scan};

use crate::error::{AuthError, Result};
use crate::scheme::CredentialScheme;

/// Operator-confirmed enrollment details, collected after a failed
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    /// Human-readable label for the new profile.
    pub display_name: String,
    /// Effect chosen from the active catalog.
    pub effect_name: String,
}

/// Creates a profile from a scan that failed authentication and appends
/// it to the store.
///
/// The stored identifier (and secondary credential, when the scan
/// carries a key) is the active scheme's forward transform of the raw
/// value, the exact inverse of the authenticator's match rule. An
/// out-of-catalog effect is rejected before anything is stored; the
/// caller re-prompts. There is no uniqueness check: repeating an
/// enrollment creates a duplicate, never an error.
pub fn enroll<S: ProfileStore>(
    scheme: &CredentialScheme,
    store: &mut S,
    scan: &Scan,
    request: &EnrollmentRequest,
    catalog: &EffectCatalog,
) -> Result<Profile> {
    if scan.identity.is_empty() {
        return Err(AuthError::InvalidInput("identity must be non-empty".into()));
    }
    if request.display_name.is_empty() {
        return Err(AuthError::InvalidInput(
            "display name must be non-empty".into(),
        ));
    }
    if !catalog.contains(&request.effect_name) {
        return Err(AuthError::UnknownEffect(request.effect_name.clone()));
    }

    let mut profile = Profile::new(
        scheme.seal(&scan.identity)?,
        request.display_name.clone(),
        request.effect_name.clone(),
    );
    if let Some(key) = scan.key.as_deref() {
        profile = profile.with_secondary_credential(scheme.seal(key)?);
    }

    store.insert(profile.clone())?;
    tracing::info!(
        display_name = %profile.display_name,
        effect = %profile.effect_name,
        scheme = scheme.name(),
        "Enrolled new profile"
    );
    Ok(profile)
}
