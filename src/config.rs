//! Configuration for SlotStore
//!
//! Centralized configuration with sensible defaults. A `Store` is built from
//! one `Config`; nothing about the data file location is process-global.

use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::schema::Schema;
use crate::storage::temp_path;

/// Main configuration for a SlotStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The flat binary data file holding all records
    pub data_path: PathBuf,

    /// Field layout of every record in the data file
    pub schema: Schema,

    /// Sync strategy: when to fsync the data file
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Report Configuration
    // -------------------------------------------------------------------------
    /// Destination of the plain-text report (rewritten on every generation)
    pub report_path: PathBuf,
}

/// Data file sync strategy
///
/// Rewrites (update/delete) always fsync before the atomic rename; this only
/// controls appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every append (safest, slowest)
    EveryWrite,

    /// Leave appends to the OS page cache, fsync only on rewrite
    OnRewrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.bin"),
            schema: Schema::stock_status(),
            sync_strategy: SyncStrategy::OnRewrite,
            report_path: PathBuf::from("report.txt"),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config for settings that cannot work together
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(StoreError::Config("data path is empty".to_string()));
        }
        if self.report_path.as_os_str().is_empty() {
            return Err(StoreError::Config("report path is empty".to_string()));
        }
        if self.data_path == self.report_path {
            return Err(StoreError::Config(format!(
                "report path must differ from data path ({})",
                self.data_path.display()
            )));
        }
        // Rewrites stage the new data file here and rename it away
        let staging = temp_path(&self.data_path);
        if self.report_path == staging {
            return Err(StoreError::Config(format!(
                "report path must differ from the rewrite temp file ({})",
                staging.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data file path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the record schema
    pub fn schema(mut self, schema: Schema) -> Self {
        self.config.schema = schema;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the report output path
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.report_path = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
