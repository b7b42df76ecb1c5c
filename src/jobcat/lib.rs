//! # Jobcat Architecture
//!
//! Jobcat is a **UI-agnostic job catalog library**. It merges postings pulled
//! from an external provider with postings curated by an admin, and offers a
//! single query surface over both. The bundled CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - The whole contract a UI may depend on                    │
//! │  - Gates admin mutations behind the access gate             │
//! │  - Returns structured Result / CmdResult types              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (catalog.rs, query.rs, normalize.rs, auth.rs)         │
//! │  - In-memory authoritative collection, sync, search, stats  │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KvStore trait (bytes in, bytes out)             │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! Nothing in the core is fatal. Storage faults are logged through `tracing`
//! and the in-memory catalog carries on; a garbled store loads as empty; a
//! provider failure leaves the catalog untouched. Unknown ids come back as
//! `None`/`false`, a wrong passcode as `false`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`catalog`]: The job collection, CRUD, sync and stats
//! - [`query`]: Free-text search and structured filters
//! - [`normalize`]: Provider payload normalization and posting-age labels
//! - [`auth`]: Shared-passcode admin session
//! - [`provider`]: External job sources
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Job`, `Provenance`, `JobFields`, `JobPatch`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod query;
pub mod store;
