//! Schema descriptor
//!
//! An ordered list of typed, fixed-width slots. Encode/decode walk this list
//! generically, so store logic is written once for every record variant.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Which record field a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    Name,
    Price,
    Category,
    StockStatus,
    Quantity,
}

impl Column {
    /// Field name as shown in reports and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Price => "price",
            Column::Category => "category",
            Column::StockStatus => "stock_status",
            Column::Quantity => "quantity",
        }
    }

    /// Whether `kind` is a legal encoding for this column
    fn accepts(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Column::Id, FieldKind::U32)
                | (Column::Quantity, FieldKind::U32)
                | (Column::Price, FieldKind::F32)
                | (Column::Name, FieldKind::Text { .. })
                | (Column::Category, FieldKind::Text { .. })
                | (Column::StockStatus, FieldKind::Text { .. })
        )
    }
}

/// On-disk encoding of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// 4-byte unsigned integer, little-endian
    U32,
    /// 4-byte IEEE-754 float, little-endian
    F32,
    /// UTF-8 text, zero padded to `width` bytes
    Text { width: usize },
}

impl FieldKind {
    /// Slot width in bytes
    pub fn width(&self) -> usize {
        match self {
            FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::Text { width } => *width,
        }
    }
}

/// One slot of the record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub column: Column,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn u32(column: Column) -> Self {
        Self {
            column,
            kind: FieldKind::U32,
        }
    }

    pub fn f32(column: Column) -> Self {
        Self {
            column,
            kind: FieldKind::F32,
        }
    }

    pub fn text(column: Column, width: usize) -> Self {
        Self {
            column,
            kind: FieldKind::Text { width },
        }
    }

    /// Slot width in bytes
    pub fn width(&self) -> usize {
        self.kind.width()
    }
}

/// Record layout: ordered slots plus the fixed record size N
///
/// N is computed once on construction and is the unit of every seek, read
/// and write the store performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    record_size: usize,
}

impl Schema {
    /// Columns every schema must carry
    const REQUIRED: [Column; 3] = [Column::Id, Column::Name, Column::Price];

    /// Widest text slot a layout may declare
    pub const MAX_SLOT_WIDTH: usize = u16::MAX as usize;

    /// Build a schema from an ordered list of slots
    ///
    /// Rejects layouts missing `id`/`name`/`price`, repeating a column,
    /// giving a column the wrong kind, or declaring a text slot that is
    /// empty or wider than `MAX_SLOT_WIDTH`.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut record_size = 0usize;
        for (i, field) in fields.iter().enumerate() {
            if !field.column.accepts(field.kind) {
                return Err(StoreError::Schema(format!(
                    "column '{}' cannot be stored as {:?}",
                    field.column.name(),
                    field.kind
                )));
            }
            if field.width() == 0 {
                return Err(StoreError::Schema(format!(
                    "column '{}' has a zero-width slot",
                    field.column.name()
                )));
            }
            if field.width() > Self::MAX_SLOT_WIDTH {
                return Err(StoreError::Schema(format!(
                    "column '{}' slot of {} bytes exceeds the {}-byte limit",
                    field.column.name(),
                    field.width(),
                    Self::MAX_SLOT_WIDTH
                )));
            }
            if fields[..i].iter().any(|f| f.column == field.column) {
                return Err(StoreError::Schema(format!(
                    "column '{}' appears more than once",
                    field.column.name()
                )));
            }
            record_size = record_size
                .checked_add(field.width())
                .ok_or_else(|| StoreError::Schema("record size overflows".to_string()))?;
        }

        if let Some(missing) = Self::REQUIRED
            .iter()
            .find(|c| !fields.iter().any(|f| f.column == **c))
        {
            return Err(StoreError::Schema(format!(
                "required column '{}' is missing",
                missing.name()
            )));
        }

        Ok(Self {
            fields,
            record_size,
        })
    }

    /// id, name[20], price, category[20], stock_status[10]: 58 bytes
    pub fn stock_status() -> Self {
        Self::from_fields(vec![
            FieldSpec::u32(Column::Id),
            FieldSpec::text(Column::Name, 20),
            FieldSpec::f32(Column::Price),
            FieldSpec::text(Column::Category, 20),
            FieldSpec::text(Column::StockStatus, 10),
        ])
    }

    /// id, name[20], price, category[20], quantity: 52 bytes
    pub fn quantity() -> Self {
        Self::from_fields(vec![
            FieldSpec::u32(Column::Id),
            FieldSpec::text(Column::Name, 20),
            FieldSpec::f32(Column::Price),
            FieldSpec::text(Column::Category, 20),
            FieldSpec::u32(Column::Quantity),
        ])
    }

    fn from_fields(fields: Vec<FieldSpec>) -> Self {
        let record_size = fields.iter().map(FieldSpec::width).sum();
        Self {
            fields,
            record_size,
        }
    }

    /// Size in bytes of one encoded record
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Slots in on-disk order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Whether the layout has a slot for `column`
    pub fn has(&self, column: Column) -> bool {
        self.field(column).is_some()
    }

    /// The slot holding `column`, if any
    pub fn field(&self, column: Column) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// (byte offset within the record, slot) pairs in on-disk order
    pub fn layout(&self) -> impl Iterator<Item = (usize, &FieldSpec)> {
        self.fields.iter().scan(0usize, |offset, field| {
            let start = *offset;
            *offset += field.width();
            Some((start, field))
        })
    }
}
