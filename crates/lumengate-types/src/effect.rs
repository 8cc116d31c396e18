//! Effect catalogs.

/// Effect started when a profile somehow carries no assignment.
pub const DEFAULT_EFFECT: &str = "purple";

/// The 2-entry catalog used by small installations.
const SHORT_CATALOG: &[&str] = &["blue", "purple"];

/// The 20-entry catalog for full sequence libraries.
const LONG_CATALOG: &[&str] = &[
    "blue",
    "purple",
    "red",
    "green",
    "orange",
    "yellow",
    "pink",
    "cyan",
    "white",
    "rainbow",
    "strobe",
    "chase",
    "fade",
    "sparkle",
    "candy-cane",
    "icicle",
    "fireworks",
    "meteor",
    "twinkle",
    "wave",
];

/// The fixed list of effects a profile may be enrolled with.
///
/// The catalog may grow between versions; profiles stored under an older
/// catalog are never revalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectCatalog {
    entries: &'static [&'static str],
}

impl EffectCatalog {
    /// The 2-entry catalog.
    pub fn short() -> Self {
        Self {
            entries: SHORT_CATALOG,
        }
    }

    /// The 20-entry catalog.
    pub fn long() -> Self {
        Self {
            entries: LONG_CATALOG,
        }
    }

    /// Checks catalog membership.
    pub fn contains(&self, effect: &str) -> bool {
        self.entries.contains(&effect)
    }

    /// All catalog entries, in display order.
    pub fn entries(&self) -> &'static [&'static str] {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_catalog() {
        let catalog = EffectCatalog::short();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("blue"));
        assert!(catalog.contains("purple"));
        assert!(!catalog.contains("rainbow"));
    }

    #[test]
    fn test_long_catalog() {
        let catalog = EffectCatalog::long();
        assert_eq!(catalog.len(), 20);
        assert!(catalog.contains("rainbow"));
        assert!(catalog.contains(DEFAULT_EFFECT));
    }

    #[test]
    fn test_long_catalog_superset_of_short() {
        let long = EffectCatalog::long();
        for effect in EffectCatalog::short().entries() {
            assert!(long.contains(effect));
        }
    }

    #[test]
    fn test_catalog_entries_unique() {
        let entries = EffectCatalog::long().entries();
        let unique: std::collections::HashSet<_> = entries.iter().collect();
        assert_eq!(unique.len(), entries.len());
    }
}
