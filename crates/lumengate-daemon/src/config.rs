//! Daemon configuration and startup validation.

use std::path::PathBuf;

use clap::ValueEnum;
use thiserror::Error;

use lumengate_auth::{AuthError, CredentialScheme, Pepper};
use lumengate_types::EffectCatalog;

/// Environment variable carrying the deployment pepper for the keyed
/// scheme.
pub const PEPPER_ENV: &str = "LUMENGATE_PEPPER";

/// Which identity reader to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReaderKind {
    /// Interactive text entry at the terminal.
    Prompt,
    /// Short-range RFID tag reader on a serial device node.
    Rfid,
    /// Serial-attached badge reader (`id[:key]` frames).
    Serial,
    /// Wiegand pin-decoder FIFO.
    Wiegand,
}

impl ReaderKind {
    /// Short name used in store file paths and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Rfid => "rfid",
            Self::Serial => "serial",
            Self::Wiegand => "wiegand",
        }
    }

    /// True for readers backed by a device node.
    pub fn is_hardware(&self) -> bool {
        !matches!(self, Self::Prompt)
    }

    /// True when the variant can yield a secondary key.
    pub fn supports_key(&self) -> bool {
        matches!(self, Self::Prompt | Self::Serial)
    }
}

/// Which credential scheme protects stored identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecurityMode {
    /// No hashing: raw identities stored in the clear.
    None,
    /// Salted argon2id, O(n) verification scan per lookup.
    Adaptive,
    /// Peppered HMAC, O(1) exact lookup. Requires [`PEPPER_ENV`].
    Keyed,
}

impl SecurityMode {
    /// Short name used in store file paths and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Adaptive => "adaptive",
            Self::Keyed => "keyed",
        }
    }
}

/// Which effect catalog enrollment selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogChoice {
    /// The 2-entry list.
    Short,
    /// The 20-entry list.
    Long,
}

/// Incompatible or incomplete startup flags. All of these are fatal
/// before the main loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Dual-factor mode with a reader that cannot produce a key.
    #[error("--dual-factor requires a reader that can yield a key (prompt or serial), not {0}")]
    DualFactorUnsupported(&'static str),

    /// A hardware reader needs its device node path.
    #[error("--device is required for the {0} reader")]
    DeviceRequired(&'static str),

    /// The prompt reader has no device behind it.
    #[error("--device has no meaning for the prompt reader")]
    DeviceForbidden,

    /// Missing deployment secret for the keyed scheme.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Validated daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active reader variant.
    pub reader: ReaderKind,
    /// Active credential scheme.
    pub security: SecurityMode,
    /// Whether scans carry a secondary key.
    pub dual_factor: bool,
    /// Which catalog enrollment selects from.
    pub catalog: CatalogChoice,
    /// Directory holding the store files.
    pub data_dir: PathBuf,
    /// Device node path for hardware readers.
    pub device: Option<PathBuf>,
}

impl Config {
    /// Checks flag compatibility. Fatal at startup on error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dual_factor && !self.reader.supports_key() {
            return Err(ConfigError::DualFactorUnsupported(self.reader.name()));
        }
        if self.reader.is_hardware() && self.device.is_none() {
            return Err(ConfigError::DeviceRequired(self.reader.name()));
        }
        if !self.reader.is_hardware() && self.device.is_some() {
            return Err(ConfigError::DeviceForbidden);
        }
        Ok(())
    }

    /// Resolves the active credential scheme, reading the pepper from
    /// the environment when the keyed scheme is selected. Absence of
    /// the pepper is fatal; there is no fallback to a weaker scheme.
    pub fn scheme(&self) -> Result<CredentialScheme, ConfigError> {
        Ok(match self.security {
            SecurityMode::None => CredentialScheme::Plain,
            SecurityMode::Adaptive => CredentialScheme::Adaptive,
            SecurityMode::Keyed => CredentialScheme::Keyed(Pepper::from_env(PEPPER_ENV)?),
        })
    }

    /// The active effect catalog.
    pub fn effect_catalog(&self) -> EffectCatalog {
        match self.catalog {
            CatalogChoice::Short => EffectCatalog::short(),
            CatalogChoice::Long => EffectCatalog::long(),
        }
    }

    /// Store file for this reader/scheme combination. Switching reader
    /// hardware or security mode starts with an empty store.
    pub fn store_path(&self) -> PathBuf {
        let suffix = if self.dual_factor { "-2fa" } else { "" };
        self.data_dir.join(format!(
            "profiles-{}-{}{}.jsonl",
            self.reader.name(),
            self.security.name(),
            suffix
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            reader: ReaderKind::Prompt,
            security: SecurityMode::None,
            dual_factor: false,
            catalog: CatalogChoice::Short,
            data_dir: PathBuf::from("./data"),
            device: None,
        }
    }

    #[test]
    fn test_prompt_defaults_validate() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_dual_factor_needs_key_capable_reader() {
        let mut config = base();
        config.reader = ReaderKind::Rfid;
        config.device = Some(PathBuf::from("/dev/ttyUSB0"));
        config.dual_factor = true;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DualFactorUnsupported(_))
        ));

        config.reader = ReaderKind::Serial;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hardware_reader_needs_device() {
        let mut config = base();
        config.reader = ReaderKind::Wiegand;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DeviceRequired("wiegand"))
        ));

        config.device = Some(PathBuf::from("/run/wiegand.fifo"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prompt_reader_rejects_device() {
        let mut config = base();
        config.device = Some(PathBuf::from("/dev/ttyUSB0"));
        assert!(matches!(config.validate(), Err(ConfigError::DeviceForbidden)));
    }

    #[test]
    fn test_non_keyed_schemes_need_no_pepper() {
        let config = base();
        assert!(matches!(config.scheme(), Ok(CredentialScheme::Plain)));

        let mut config = base();
        config.security = SecurityMode::Adaptive;
        assert!(matches!(config.scheme(), Ok(CredentialScheme::Adaptive)));
    }

    #[test]
    fn test_keyed_scheme_requires_pepper() {
        // Sole test touching PEPPER_ENV, so no parallel-test races.
        let mut config = base();
        config.security = SecurityMode::Keyed;

        std::env::remove_var(PEPPER_ENV);
        assert!(matches!(config.scheme(), Err(ConfigError::Auth(_))));

        std::env::set_var(PEPPER_ENV, "s3cret");
        assert!(matches!(config.scheme(), Ok(CredentialScheme::Keyed(_))));
        std::env::remove_var(PEPPER_ENV);
    }

    #[test]
    fn test_store_path_per_combination() {
        let mut config = base();
        assert_eq!(
            config.store_path(),
            PathBuf::from("./data/profiles-prompt-none.jsonl")
        );

        config.reader = ReaderKind::Serial;
        config.security = SecurityMode::Keyed;
        config.dual_factor = true;
        assert_eq!(
            config.store_path(),
            PathBuf::from("./data/profiles-serial-keyed-2fa.jsonl")
        );
    }
}
