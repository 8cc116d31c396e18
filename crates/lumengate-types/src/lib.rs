//! Core data types for Lumengate.
//!
//! This crate defines the records shared by every other crate in the
//! workspace:
//! - **Profile**: a stored mapping from a (possibly hashed) identity to a
//!   display name and an effect assignment
//! - **Scan**: the output of an identity reader (raw id, optional key)
//! - **EffectCatalog**: the fixed list of effects a profile may be
//!   enrolled with

mod effect;
mod profile;
mod scan;

pub use effect::{EffectCatalog, DEFAULT_EFFECT};
pub use profile::Profile;
pub use scan::Scan;
