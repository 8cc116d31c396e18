//! The profile store interface.

use crate::Result;
use lumengate_types::Profile;

/// Interface over a flat collection of profile records.
///
/// Implementations include the JSON-lines flat file used in production
/// and an in-memory store for tests. The system is single-session and
/// single-threaded, so mutators take `&mut self` and no locking exists
/// anywhere in the store.
pub trait ProfileStore {
    /// All stored profiles, in insertion order.
    fn all(&self) -> &[Profile];

    /// Exact-match lookup on the stored identifier form.
    fn find_by_identifier(&self, identifier: &str) -> Option<&Profile> {
        self.all().iter().find(|p| p.identifier == identifier)
    }

    /// Appends a new profile. No uniqueness check is performed.
    fn insert(&mut self, profile: Profile) -> Result<()>;

    /// Rewrites the stored identifier of the record currently stored
    /// under `old`, preserving all other fields.
    fn update_identifier(&mut self, old: &str, new: &str) -> Result<()>;

    /// Number of stored profiles.
    fn len(&self) -> usize {
        self.all().len()
    }

    /// True when no profiles exist.
    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

// Implement ProfileStore for &mut T, so a caller can lend a store to
// the session and inspect it afterwards.
impl<T: ProfileStore + ?Sized> ProfileStore for &mut T {
    fn all(&self) -> &[Profile] {
        (**self).all()
    }

    fn insert(&mut self, profile: Profile) -> Result<()> {
        (**self).insert(profile)
    }

    fn update_identifier(&mut self, old: &str, new: &str) -> Result<()> {
        (**self).update_identifier(old, new)
    }
}
