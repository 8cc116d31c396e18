//! Short-range RFID tag reader.

use std::path::Path;

use crate::error::Result;
use crate::reader::device::LineDevice;
use crate::reader::IdentityReader;
use crate::shutdown::ShutdownFlag;
use lumengate_types::Scan;

/// Line-framed RFID reader on a serial device node. Tags arrive as hex
/// digit strings, one per line; anything else is noise and is skipped.
#[derive(Debug)]
pub struct RfidReader {
    device: LineDevice,
}

impl RfidReader {
    /// Opens the reader on `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            device: LineDevice::open(path)?,
        })
    }
}

impl IdentityReader for RfidReader {
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>> {
        loop {
            let Some(line) = self.device.next_line(shutdown)? else {
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }
            if !line.chars().all(|c| c.is_ascii_hexdigit()) {
                tracing::warn!(frame = %line, "Discarding malformed tag frame");
                continue;
            }
            tracing::debug!("Read RFID tag");
            return Ok(Some(Scan::new(line)));
        }
    }

    fn cleanup(&mut self) {
        self.device.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_skips_noise_frames() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "not a tag!").unwrap();
        writeln!(tmp).unwrap();
        writeln!(tmp, "0006789abc").unwrap();
        tmp.flush().unwrap();

        let mut reader = RfidReader::open(tmp.path()).unwrap();
        let scan = reader.read(&ShutdownFlag::new()).unwrap().unwrap();
        assert_eq!(scan.identity, "0006789abc");
        assert!(scan.key.is_none());
        assert!(!reader.supports_key());
    }
}
