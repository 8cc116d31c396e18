//! Hardware collaborators for Lumengate.
//!
//! This crate provides:
//! - **Identity readers**: interactive text entry, short-range RFID,
//!   serial badge reader, and a Wiegand pin-decoder, all behind one
//!   two-operation contract ([`IdentityReader`])
//! - **Effect controller**: fire-and-forget start/stop commands against
//!   the local lighting-playback service ([`EffectController`])
//! - **Shutdown flag**: the cooperative interrupt signal shared by the
//!   session loop and reader poll loops

mod effect;
mod error;
mod reader;
mod shutdown;

pub use effect::{EffectCommand, EffectController, FppController, RecordingController};
pub use error::{HwError, Result};
pub use reader::{
    IdentityReader, PromptReader, RfidReader, SerialBadgeReader, WiegandReader,
};
pub use shutdown::ShutdownFlag;
