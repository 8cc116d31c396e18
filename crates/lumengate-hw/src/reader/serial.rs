//! Serial-attached badge reader.

use std::path::Path;

use crate::error::Result;
use crate::reader::device::LineDevice;
use crate::reader::IdentityReader;
use crate::shutdown::ShutdownFlag;
use lumengate_types::Scan;

/// Badge reader speaking line frames of the form `id` or `id:key`.
/// The only hardware variant that yields a secondary key.
#[derive(Debug)]
pub struct SerialBadgeReader {
    device: LineDevice,
}

impl SerialBadgeReader {
    /// Opens the reader on `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            device: LineDevice::open(path)?,
        })
    }
}

impl IdentityReader for SerialBadgeReader {
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>> {
        loop {
            let Some(line) = self.device.next_line(shutdown)? else {
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }

            let (identity, key) = match line.split_once(':') {
                Some((id, key)) => (id.trim(), Some(key.trim())),
                None => (line.as_str(), None),
            };
            if identity.is_empty() {
                tracing::warn!(frame = %line, "Discarding badge frame without an id");
                continue;
            }

            let mut scan = Scan::new(identity);
            if let Some(key) = key.filter(|k| !k.is_empty()) {
                scan = scan.with_key(key);
            }
            tracing::debug!(has_key = scan.key.is_some(), "Read badge frame");
            return Ok(Some(scan));
        }
    }

    fn cleanup(&mut self) {
        self.device.close();
    }

    fn supports_key(&self) -> bool {
        true
    }
}
