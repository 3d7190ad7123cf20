//! Storage Module
//!
//! Durable CRUD over a single flat file of fixed-size records.
//!
//! ## Responsibilities
//! - Append encoded records at the end of the file
//! - Sequential scans in file order, decoding each N-byte block
//! - Update/delete by rewriting the whole file (temp file + atomic rename)
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Record 0   (N bytes, see schema)       │
//! ├────────────────────────────────────────┤
//! │ Record 1   (N bytes)                   │
//! ├────────────────────────────────────────┤
//! │ ...                                    │
//! ├────────────────────────────────────────┤
//! │ Record K-1 (N bytes)                   │
//! └────────────────────────────────────────┘
//! ```
//!
//! No header, footer, free list or tombstones. A file whose length is not a
//! multiple of N is corrupt.
//!
//! ## Durability
//! Appends go straight to the end of the file. Update and delete build the
//! complete new contents, write them to `<data file>.tmp`, fsync, and rename
//! over the data file, so a crash leaves either the old or the new file.
//! There is no locking between processes.

mod reader;
mod store;
mod writer;

use serde::Serialize;

use crate::schema::Record;

pub use reader::{Block, RecordReader};
pub use store::Store;
pub use writer::{append_block, rewrite};
pub(crate) use writer::temp_path;

// =============================================================================
// Scan Result
// =============================================================================

/// Outcome of a full scan
///
/// Distinguishes "no data file yet" from "data file with zero records";
/// neither is an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "records", rename_all = "snake_case")]
pub enum Scan {
    /// The data file does not exist
    Missing,
    /// Every record in file order
    Records(Vec<Record>),
}

impl Scan {
    /// True if the data file does not exist
    pub fn is_missing(&self) -> bool {
        matches!(self, Scan::Missing)
    }

    /// Records in file order (empty when the file is missing)
    pub fn records(&self) -> &[Record] {
        match self {
            Scan::Missing => &[],
            Scan::Records(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Scan::Missing => Vec::new(),
            Scan::Records(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

// =============================================================================
// Update Payload
// =============================================================================

/// New field values for `Store::replace_where`
///
/// Unset fields keep their stored value. `replace_all` sets every field of a
/// record, which replaces the full field set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub price: Option<f32>,
    pub category: Option<String>,
    pub stock_status: Option<String>,
    pub quantity: Option<u32>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every non-id field with the values of `record`
    pub fn replace_all(record: Record) -> Self {
        Self {
            name: Some(record.name),
            price: Some(record.price),
            category: record.category,
            stock_status: record.stock_status,
            quantity: record.quantity,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f32) -> Self {
        self.price = Some(price);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn stock_status(mut self, status: impl Into<String>) -> Self {
        self.stock_status = Some(status.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// True if no field would change
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields to `record`, keeping its id
    pub fn apply(&self, record: &mut Record) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(category) = &self.category {
            record.category = Some(category.clone());
        }
        if let Some(status) = &self.stock_status {
            record.stock_status = Some(status.clone());
        }
        if let Some(quantity) = self.quantity {
            record.quantity = Some(quantity);
        }
    }
}
