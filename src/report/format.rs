//! Report rendering
//!
//! ## Layout
//! ```text
//! Inventory Report
//! ================
//!
//! Category: Office
//! ID        Name                  Price       Stock Status
//! ----------------------------------------------------------
//! 1         Pen                   5.50        In Stock
//! Subtotal: 1 item(s), value 5.50
//!
//! Grand total: 2 categories, 2 item(s), value 25.50
//! ```
//!
//! Columns are left-justified and sized from the schema's slot widths, so a
//! stored value always fits its column.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::schema::{Column, FieldKind, Record, Schema};

use super::group::{CategoryGroup, Summary};

const ID_WIDTH: usize = 10;
const NUMBER_WIDTH: usize = 12;
const GAP: usize = 2;

/// A rendered view over a `Summary`
#[derive(Debug, Clone)]
pub struct Report {
    schema: Schema,
    summary: Summary,
}

/// One table column: header text and display width
struct ReportColumn {
    column: Column,
    header: &'static str,
    width: usize,
}

impl Report {
    pub fn new(schema: Schema, summary: Summary) -> Self {
        Self { schema, summary }
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Rewrite the report file with the rendered text (UTF-8)
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Table columns in schema order; category is the section heading, so it
    /// is left out of the rows
    fn columns(&self) -> Vec<ReportColumn> {
        self.schema
            .fields()
            .iter()
            .filter(|f| f.column != Column::Category)
            .map(|f| {
                let header = match f.column {
                    Column::Id => "ID",
                    Column::Name => "Name",
                    Column::Price => "Price",
                    Column::Category => "Category",
                    Column::StockStatus => "Stock Status",
                    Column::Quantity => "Quantity",
                };
                let width = match (f.column, f.kind) {
                    (Column::Id, _) => ID_WIDTH,
                    (_, FieldKind::Text { width }) => width.max(header.len()) + GAP,
                    _ => NUMBER_WIDTH,
                };
                ReportColumn {
                    column: f.column,
                    header,
                    width,
                }
            })
            .collect()
    }

    fn write_group(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[ReportColumn],
        group: &CategoryGroup,
    ) -> fmt::Result {
        let heading = group.category.as_deref().unwrap_or("(none)");
        writeln!(f, "Category: {}", heading)?;

        let mut header = String::new();
        for col in columns {
            header.push_str(&format!("{:<width$}", col.header, width = col.width));
        }
        writeln!(f, "{}", header.trim_end())?;
        writeln!(f, "{}", "-".repeat(columns.iter().map(|c| c.width).sum()))?;

        for record in &group.records {
            let mut row = String::new();
            for col in columns {
                row.push_str(&format!(
                    "{:<width$}",
                    cell(record, col.column),
                    width = col.width
                ));
            }
            writeln!(f, "{}", row.trim_end())?;
        }

        write!(
            f,
            "Subtotal: {} item(s), value {:.2}",
            group.item_count, group.total_value
        )?;
        if self.schema.has(Column::Quantity) {
            write!(f, ", quantity {}", group.total_quantity)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inventory Report")?;
        writeln!(f, "================")?;

        let columns = self.columns();
        for group in &self.summary.groups {
            writeln!(f)?;
            self.write_group(f, &columns, group)?;
        }

        writeln!(f)?;
        write!(
            f,
            "Grand total: {} categories, {} item(s), value {:.2}",
            self.summary.total_categories, self.summary.total_items, self.summary.total_value
        )?;
        if self.schema.has(Column::Quantity) {
            write!(f, ", quantity {}", self.summary.total_quantity)?;
        }
        writeln!(f)
    }
}

fn cell(record: &Record, column: Column) -> String {
    match column {
        Column::Id => record.id.to_string(),
        Column::Name => record.name.clone(),
        Column::Price => format!("{:.2}", record.price),
        Column::Category => record.category.clone().unwrap_or_default(),
        Column::StockStatus => record.stock_status.clone().unwrap_or_default(),
        Column::Quantity => record.quantity.map(|q| q.to_string()).unwrap_or_default(),
    }
}
