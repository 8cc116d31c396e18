//! Wiegand pin-decoder reader.

use std::path::Path;

use crate::error::Result;
use crate::reader::device::LineDevice;
use crate::reader::IdentityReader;
use crate::shutdown::ShutdownFlag;
use lumengate_types::Scan;

/// Reads decoded Wiegand frames from a pin-decoder FIFO. Each frame is
/// `facility,card` in decimal; the identity is rendered as `FFF-CCCCC`
/// so it stays stable across decoder firmware versions.
#[derive(Debug)]
pub struct WiegandReader {
    device: LineDevice,
}

impl WiegandReader {
    /// Opens the reader on the decoder FIFO at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            device: LineDevice::open(path)?,
        })
    }

    fn parse(frame: &str) -> Option<String> {
        let (facility, card) = frame.split_once(',')?;
        let facility: u32 = facility.trim().parse().ok()?;
        let card: u32 = card.trim().parse().ok()?;
        Some(format!("{facility:03}-{card:05}"))
    }
}

impl IdentityReader for WiegandReader {
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>> {
        loop {
            let Some(line) = self.device.next_line(shutdown)? else {
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }
            match Self::parse(&line) {
                Some(identity) => {
                    tracing::debug!("Read Wiegand frame");
                    return Ok(Some(Scan::new(identity)));
                }
                None => {
                    tracing::warn!(frame = %line, "Discarding malformed Wiegand frame");
                }
            }
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
    fn test_renders_facility_and_card() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "garbage").unwrap();
        writeln!(tmp, "12,3456").unwrap();
        tmp.flush().unwrap();

        let mut reader = WiegandReader::open(tmp.path()).unwrap();
        let scan = reader.read(&ShutdownFlag::new()).unwrap().unwrap();
        assert_eq!(scan.identity, "012-03456");
        assert!(!reader.supports_key());
    }

    #[test]
    fn test_parse_rejects_bad_frames() {
        assert!(WiegandReader::parse("12").is_none());
        assert!(WiegandReader::parse("a,b").is_none());
        assert!(WiegandReader::parse("12,").is_none());
        assert_eq!(WiegandReader::parse("1, 2").as_deref(), Some("001-00002"));
    }
}
