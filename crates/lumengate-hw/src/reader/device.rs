//! Shared line-framed device polling.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::shutdown::ShutdownFlag;

/// Pause between empty polls. Keeps the loop off the CPU while waiting
/// for hardware input.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Line-framed reads from a device node (serial tty, decoder FIFO, or a
/// plain file in tests).
///
/// Bytes are read one chunk at a time rather than through `BufReader`,
/// so an interrupted syscall surfaces here and the shutdown flag is
/// honored mid-read instead of being swallowed by a retry loop.
#[derive(Debug)]
pub(crate) struct LineDevice {
    path: PathBuf,
    file: Option<File>,
    pending: Vec<u8>,
}

impl LineDevice {
    /// Opens the device eagerly so a bad path fails at startup, not on
    /// the first scan.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        tracing::debug!(path = %path.display(), "Opened reader device");
        Ok(Self {
            path,
            file: Some(file),
            pending: Vec::new(),
        })
    }

    /// Device node path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Blocks until one full line arrives. `Ok(None)` when shutdown is
    /// requested or the device was already closed. There is no timeout;
    /// the device may stay silent indefinitely.
    pub fn next_line(&mut self, shutdown: &ShutdownFlag) -> Result<Option<String>> {
        let Some(file) = self.file.as_mut() else {
            return Ok(None);
        };

        let mut buf = [0u8; 256];
        loop {
            if shutdown.is_set() {
                return Ok(None);
            }
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line).trim().to_string();
                return Ok(Some(line));
            }
            match file.read(&mut buf) {
                Ok(0) => std::thread::sleep(POLL_INTERVAL),
                Ok(n) => self.pending.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Releases the file handle. Idempotent.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            tracing::debug!(path = %self.path.display(), "Released reader device");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_lines_in_order() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "first").unwrap();
        writeln!(tmp, "second").unwrap();
        tmp.flush().unwrap();

        let shutdown = ShutdownFlag::new();
        let mut device = LineDevice::open(tmp.path()).unwrap();
        assert_eq!(device.next_line(&shutdown).unwrap().as_deref(), Some("first"));
        assert_eq!(device.next_line(&shutdown).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_shutdown_breaks_poll_loop() {
        // Empty file: the device would poll forever without the flag.
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let shutdown = ShutdownFlag::new();
        let mut device = LineDevice::open(tmp.path()).unwrap();

        let setter = shutdown.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            setter.trigger();
        });

        assert!(device.next_line(&shutdown).unwrap().is_none());
        handle.join().unwrap();
    }

    #[test]
    fn test_closed_device_yields_none() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut device = LineDevice::open(tmp.path()).unwrap();
        device.close();
        device.close();
        assert!(device.next_line(&ShutdownFlag::new()).unwrap().is_none());
    }

    #[test]
    fn test_missing_device_fails_at_open() {
        assert!(LineDevice::open("/definitely/not/a/device").is_err());
    }
}
