//! Interactive text-entry reader.

use dialoguer::Input;

use crate::error::{HwError, Result};
use crate::reader::IdentityReader;
use crate::shutdown::ShutdownFlag;
use lumengate_types::Scan;

/// Reads identities typed at the terminal. The only reader with no
/// hardware behind it; dual-factor installations collect the key with a
/// second prompt.
#[derive(Debug)]
pub struct PromptReader {
    dual_factor: bool,
}

impl PromptReader {
    /// Single-factor prompt reader.
    pub fn new() -> Self {
        Self { dual_factor: false }
    }

    /// Also prompt for a secondary key after each id.
    pub fn with_dual_factor(mut self, dual_factor: bool) -> Self {
        self.dual_factor = dual_factor;
        self
    }

    fn ask(prompt: &str) -> Result<Option<String>> {
        match Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                Ok(None)
            }
            Err(e) => Err(HwError::Prompt(e.to_string())),
        }
    }
}

impl Default for PromptReader {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityReader for PromptReader {
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>> {
        loop {
            if shutdown.is_set() {
                return Ok(None);
            }
            let Some(identity) = Self::ask("ID")? else {
                return Ok(None);
            };
            if shutdown.is_set() {
                return Ok(None);
            }
            if identity.is_empty() {
                continue;
            }

            let mut scan = Scan::new(identity);
            if self.dual_factor {
                let Some(key) = Self::ask("Key")? else {
                    return Ok(None);
                };
                if !key.is_empty() {
                    scan = scan.with_key(key);
                }
            }
            return Ok(Some(scan));
        }
    }

    fn cleanup(&mut self) {
        // Nothing held; the terminal belongs to the process.
    }

    fn supports_key(&self) -> bool {
        true
    }
}
