//! # SlotStore
//!
//! A minimal record store backed by a single flat binary file:
//! - Fixed-size records, each field packed into a fixed-width slot
//! - Schema descriptor drives a generic encode/decode
//! - Append-only inserts, full-file rewrite for update and delete
//! - Grouped-by-category aggregation and a plain-text report
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLI (slotstore-cli)                         │
//! │           add / list / find / update / delete / report       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │   Append │ ScanAll │ FindByIdOrName │ Replace/RemoveWhere    │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │  Record Codec   │                │     Report      │
//!   │ (Schema slots)  │                │  (by category)  │
//!   └────────┬────────┘                └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │   data file     │
//!   │ K × N-byte recs │
//!   └─────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Single process, single thread. Every operation opens the data file, does
//! its full scan or rewrite, and drops the handle before returning. There is
//! no file locking: two processes operating on the same file at once may lose
//! updates or observe a half-written file.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod schema;
pub mod storage;
pub mod report;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, SyncStrategy};
pub use schema::{Column, FieldKind, FieldSpec, Record, Schema};
pub use storage::{RecordUpdate, Scan, Store};
pub use report::{CategoryGroup, Report, Summary};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SlotStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
