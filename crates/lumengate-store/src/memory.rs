//! In-memory store for tests and dry runs.

use lumengate_types::Profile;

use crate::error::{Result, StoreError};
use crate::traits::ProfileStore;

/// Vec-backed profile store with no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Vec<Profile>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with profiles.
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }
}

impl ProfileStore for MemoryStore {
    fn all(&self) -> &[Profile] {
        &self.profiles
    }

    fn insert(&mut self, profile: Profile) -> Result<()> {
        self.profiles.push(profile);
        Ok(())
    }

    fn update_identifier(&mut self, old: &str, new: &str) -> Result<()> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.identifier == old)
            .ok_or(StoreError::NotFound)?;
        profile.identifier = new.to_string();
        Ok(())
    }
}
