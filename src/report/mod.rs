//! Report Module
//!
//! Grouped aggregation over all records and the plain-text report built
//! from it.
//!
//! ## Responsibilities
//! - Group records by category, keeping first-seen category order and file
//!   order within each group
//! - Per-group item count, priced value and quantity totals
//! - Store-wide totals (value, items, distinct categories)
//! - Render a fixed-width text table and rewrite the report file

mod format;
mod group;

pub use format::Report;
pub use group::{group_by_category, CategoryGroup, Summary};
