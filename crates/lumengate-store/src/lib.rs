//! Profile storage for Lumengate.
//!
//! Profiles live in an append-friendly JSON-lines flat file, one record
//! per line. There are no transactions and no indexes beyond a linear
//! scan; the file is read fully at open, appended on insert, and
//! rewritten in place on identifier migration.
//!
//! One store file exists per reader-type/security-mode combination, so
//! switching reader hardware or security mode starts with an empty
//! store (the active credential scheme is therefore never mixed within
//! one file).

mod error;
mod file;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use file::FlatFileStore;
pub use memory::MemoryStore;
pub use traits::ProfileStore;
