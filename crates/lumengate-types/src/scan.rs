//! Reader output.

/// One identity read from a reader: the raw identity string plus an
/// optional secondary key (dual-factor readers only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// Raw identity as the reader produced it (tag id, badge frame, typed
    /// name).
    pub identity: String,
    /// Secondary credential, when the reader variant yields one.
    pub key: Option<String>,
}

impl Scan {
    /// Creates a scan carrying only an identity.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            key: None,
        }
    }

    /// Attaches a secondary key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}
