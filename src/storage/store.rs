//! Store
//!
//! The record store handle that every operation goes through.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::{BufMut, BytesMut};

use crate::config::{Config, SyncStrategy};
use crate::error::{Result, StoreError};
use crate::report::{self, Report, Summary};
use crate::schema::{self, Record, Schema};

use super::reader::RecordReader;
use super::writer;
use super::{RecordUpdate, Scan};

/// What a rewrite does with one scanned record
enum Edit {
    Keep,
    Replace(Record),
    Drop,
}

/// Handle on one data file
///
/// Holds configuration only. Each operation opens the file, does its whole
/// scan or rewrite, and closes it before returning, on success and on error.
/// Build one per data file and pass it to whatever needs the store.
#[derive(Debug, Clone)]
pub struct Store {
    config: Config,
}

impl Store {
    /// Create a store handle from a config
    ///
    /// Does not touch the filesystem; the data file is created by the first
    /// `append`.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            path = %config.data_path.display(),
            record_size = config.schema.record_size(),
            "store opened"
        );
        Ok(Self { config })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config (stock-status schema) with the specified data file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::builder().data_path(path).build())
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Append a record at the end of the data file
    ///
    /// Duplicate ids are not checked; lookups resolve to the first match in
    /// file order.
    pub fn append(&self, record: &Record) -> Result<()> {
        let block = schema::encode(self.schema(), record)?;
        let sync = self.config.sync_strategy == SyncStrategy::EveryWrite;
        writer::append_block(self.data_path(), &block, sync)?;

        tracing::debug!(id = record.id, path = %self.data_path().display(), "record appended");
        Ok(())
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Streaming scan; `None` if the data file does not exist
    pub fn iter(&self) -> Result<Option<RecordReader<'_>>> {
        RecordReader::open(self.data_path(), self.schema())
    }

    /// Every record in file order
    ///
    /// Each call re-reads the file from disk.
    pub fn scan_all(&self) -> Result<Scan> {
        let Some(reader) = self.iter()? else {
            tracing::debug!(path = %self.data_path().display(), "scan: data file not found");
            return Ok(Scan::Missing);
        };

        let records = reader.collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = records.len(), "scan complete");
        Ok(Scan::Records(records))
    }

    /// First record whose id or name matches `query`, in file order
    ///
    /// A record matches if its decimal id equals `query`, or its trimmed
    /// name equals `query` ignoring case. Stops at the first match.
    pub fn find_by_id_or_name(&self, query: &str) -> Result<Option<Record>> {
        let Some(reader) = self.iter()? else {
            return Ok(None);
        };

        for record in reader {
            let record = record?;
            if record.matches_query(query) {
                tracing::debug!(query, id = record.id, "lookup hit");
                return Ok(Some(record));
            }
        }

        tracing::debug!(query, "lookup miss");
        Ok(None)
    }

    /// Number of records, from the file length alone
    pub fn count(&self) -> Result<usize> {
        let len = match fs::metadata(self.data_path()) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let size = self.schema().record_size() as u64;
        let partial = len % size;
        if partial != 0 {
            return Err(StoreError::corruption(
                len - partial,
                format!(
                    "file length {} is not a multiple of record size {}",
                    len, size
                ),
            ));
        }
        Ok((len / size) as usize)
    }

    // =========================================================================
    // Update / Delete
    // =========================================================================

    /// Apply `update` to every record whose id is `id`, then rewrite the file
    ///
    /// All matches are updated, not just the first. Non-matching records are
    /// copied byte-for-byte. Returns whether anything was updated; when
    /// nothing matched the file is left untouched.
    pub fn replace_where(&self, id: u32, update: &RecordUpdate) -> Result<bool> {
        let updated = self.rewrite_where("update", |mut record| {
            if record.id != id {
                return Edit::Keep;
            }
            update.apply(&mut record);
            Edit::Replace(record)
        })?;
        Ok(updated > 0)
    }

    /// Drop every record whose id is `id`, then rewrite the file
    ///
    /// Returns whether anything was removed; deleting an absent id leaves the
    /// file untouched.
    pub fn remove_where(&self, id: u32) -> Result<bool> {
        let removed = self.rewrite_where("delete", |record| {
            if record.id == id {
                Edit::Drop
            } else {
                Edit::Keep
            }
        })?;
        Ok(removed > 0)
    }

    /// Scan every block, let `edit` decide its fate, and commit the result
    /// with an atomic rewrite. Returns the number of records replaced or
    /// dropped.
    ///
    /// The new contents are fully encoded in memory before anything is
    /// written, so an encoding failure leaves the data file as it was.
    fn rewrite_where<F>(&self, op: &'static str, mut edit: F) -> Result<usize>
    where
        F: FnMut(Record) -> Edit,
    {
        let schema = self.schema();
        let Some(mut reader) = self.iter()? else {
            return Err(StoreError::FileNotFound(self.data_path().to_path_buf()));
        };

        let mut contents = BytesMut::new();
        let mut kept = 0usize;
        let mut matched = 0usize;

        while let Some(block) = reader.next_block()? {
            let record = block.decode(schema)?;
            match edit(record) {
                Edit::Keep => {
                    contents.put_slice(&block.bytes);
                    kept += 1;
                }
                Edit::Replace(record) => {
                    schema::encode_into(schema, &record, &mut contents)?;
                    matched += 1;
                }
                Edit::Drop => matched += 1,
            }
        }
        drop(reader);

        if matched == 0 {
            tracing::debug!(op, "no matching records, data file untouched");
            return Ok(0);
        }

        writer::rewrite(self.data_path(), &contents)?;
        tracing::info!(
            op,
            matched,
            kept,
            path = %self.data_path().display(),
            "data file rewritten"
        );
        Ok(matched)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Group all records by category with per-group and store-wide totals
    pub fn group_by_category(&self) -> Result<Summary> {
        let scan = self.scan_all()?;
        Ok(report::group_by_category(&scan))
    }

    /// Regenerate the report file at the configured report path
    ///
    /// Returns `None` (and writes nothing) if the data file does not exist.
    pub fn write_report(&self) -> Result<Option<Report>> {
        let summary = self.group_by_category()?;
        if summary.missing {
            return Ok(None);
        }

        let report = Report::new(self.schema().clone(), summary);
        report.write(&self.config.report_path)?;
        tracing::info!(
            path = %self.config.report_path.display(),
            records = report.summary().total_items,
            "report written"
        );
        Ok(Some(report))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the data file path
    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    /// Get the record schema
    pub fn schema(&self) -> &Schema {
        &self.config.schema
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
