//! # Storage Layer
//!
//! The catalog's only I/O boundary is a durable key-value byte store. The
//! [`KvStore`] trait keeps the catalog and the access gate ignorant of where
//! bytes actually end up.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One file per key: `{key}.json` under the data directory
//!   - Writes go to a temp file first and are renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! ~/.local/share/jobcat/
//! ├── jobs.json            # The whole job collection (JSON array)
//! ├── admin_session.json   # Session flag ("true")
//! └── config.json          # Configuration (read by config.rs, not by the store)
//! ```
//!
//! Every catalog mutation rewrites the whole collection. That is fine for a
//! catalog of a few hundred jobs.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for raw byte storage.
///
/// Methods take `&self`; in-memory implementations use interior mutability
/// since the catalog is single-threaded.
pub trait KvStore {
    /// Read the bytes stored under `key`. `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `bytes` under `key`, replacing any previous value.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
