//! Stored user profiles.

use serde::{Deserialize, Serialize};

/// A stored user profile.
///
/// The `identifier` holds exactly one of three forms, fixed by the
/// credential scheme active when the profile was created: the raw
/// submitted id, an argon2 PHC string, or a peppered HMAC hex digest.
/// `display_name` and `effect_name` are set at enrollment and never
/// change; the identifier changes only through lazy scheme migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stored identity (raw or sealed, depending on the active scheme).
    pub identifier: String,
    /// Sealed secondary credential, present only for dual-factor
    /// enrollments.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secondary_credential: Option<String>,
    /// Human-readable label.
    pub display_name: String,
    /// Effect assigned at enrollment; member of the catalog at that time.
    pub effect_name: String,
}

impl Profile {
    /// Creates a profile without a secondary credential.
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        effect_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            secondary_credential: None,
            display_name: display_name.into(),
            effect_name: effect_name.into(),
        }
    }

    /// Sets the sealed secondary credential.
    pub fn with_secondary_credential(mut self, credential: impl Into<String>) -> Self {
        self.secondary_credential = Some(credential.into());
        self
    }
}
