//! Identity readers.
//!
//! Every physical or interactive input method presents the same
//! two-operation contract: a blocking `read` that yields a [`Scan`]
//! (or `None` once shutdown is requested) and an idempotent `cleanup`
//! called exactly once on exit.

mod device;
mod prompt;
mod rfid;
mod serial;
mod wiegand;

pub use prompt::PromptReader;
pub use rfid::RfidReader;
pub use serial::SerialBadgeReader;
pub use wiegand::WiegandReader;

use crate::error::Result;
use crate::shutdown::ShutdownFlag;
use lumengate_types::Scan;

/// An input source yielding raw identity strings.
///
/// Implementations block on `read` until input arrives; hardware
/// variants poll with a short sleep between attempts and check the
/// shutdown flag between polls, so an interrupt never strands the loop.
pub trait IdentityReader {
    /// Blocks until an identity is read. `Ok(None)` means shutdown was
    /// requested (or the device reached a terminal state) and no scan
    /// will follow.
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>>;

    /// Releases any held hardware resource. Called once at shutdown.
    fn cleanup(&mut self);

    /// True when this reader variant can yield a secondary key.
    fn supports_key(&self) -> bool {
        false
    }
}

impl<T: IdentityReader + ?Sized> IdentityReader for &mut T {
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>> {
        (**self).read(shutdown)
    }

    fn cleanup(&mut self) {
        (**self).cleanup();
    }

    fn supports_key(&self) -> bool {
        (**self).supports_key()
    }
}

// Implement IdentityReader for Box<T>, so the daemon can pick a variant
// at runtime.
impl<T: IdentityReader + ?Sized> IdentityReader for Box<T> {
    fn read(&mut self, shutdown: &ShutdownFlag) -> Result<Option<Scan>> {
        (**self).read(shutdown)
    }

    fn cleanup(&mut self) {
        (**self).cleanup();
    }

    fn supports_key(&self) -> bool {
        (**self).supports_key()
    }
}
