//! Record codec
//!
//! Encoding and decoding of a single fixed-size record.
//!
//! - `U32` / `F32` slots: 4 bytes, little-endian
//! - `Text` slots: UTF-8, silently truncated at a char boundary to fit the
//!   slot, right-padded with zero bytes; decoded by stripping trailing zero
//!   bytes and then trailing whitespace

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, StoreError};

use super::{Column, FieldKind, Record, Schema};

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record to exactly `schema.record_size()` bytes
pub fn encode(schema: &Schema, record: &Record) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(schema.record_size());
    encode_into(schema, record, &mut buf)?;
    Ok(buf.freeze())
}

/// Append the encoding of `record` to `buf`
///
/// On error nothing is appended.
pub fn encode_into(schema: &Schema, record: &Record, buf: &mut BytesMut) -> Result<()> {
    check_encodable(schema, record)?;

    buf.reserve(schema.record_size());
    for field in schema.fields() {
        match field.kind {
            FieldKind::U32 => buf.put_u32_le(u32_value(record, field.column)?),
            FieldKind::F32 => buf.put_f32_le(record.price),
            FieldKind::Text { width } => put_text(buf, text_value(record, field.column)?, width),
        }
    }
    Ok(())
}

/// Reject records the layout cannot represent before any byte is written
fn check_encodable(schema: &Schema, record: &Record) -> Result<()> {
    for column in [Column::Category, Column::StockStatus, Column::Quantity] {
        match (schema.has(column), record.has(column)) {
            (true, false) => return Err(missing(record, column)),
            (false, true) => {
                return Err(StoreError::Encoding(format!(
                    "record {} sets '{}', which this schema has no slot for",
                    record.id,
                    column.name()
                )))
            }
            _ => {}
        }
    }

    if !record.price.is_finite() {
        return Err(StoreError::Encoding(format!(
            "record {} has non-finite price {}",
            record.id, record.price
        )));
    }

    Ok(())
}

fn u32_value(record: &Record, column: Column) -> Result<u32> {
    match column {
        Column::Id => Ok(record.id),
        Column::Quantity => record.quantity.ok_or_else(|| missing(record, column)),
        other => Err(StoreError::Encoding(format!(
            "'{}' is not an integer column",
            other.name()
        ))),
    }
}

fn text_value(record: &Record, column: Column) -> Result<&str> {
    match column {
        Column::Name => Ok(&record.name),
        Column::Category => record.category.as_deref().ok_or_else(|| missing(record, column)),
        Column::StockStatus => record
            .stock_status
            .as_deref()
            .ok_or_else(|| missing(record, column)),
        other => Err(StoreError::Encoding(format!(
            "'{}' is not a text column",
            other.name()
        ))),
    }
}

fn missing(record: &Record, column: Column) -> StoreError {
    StoreError::Encoding(format!(
        "record {} has no value for '{}'",
        record.id,
        column.name()
    ))
}

/// Write `text` into a zero-padded slot of `width` bytes
fn put_text(buf: &mut BytesMut, text: &str, width: usize) {
    let fitted = truncate_utf8(text, width);
    buf.put_slice(fitted.as_bytes());
    buf.put_bytes(0, width - fitted.len());
}

/// Longest prefix of `text` that fits in `width` bytes without splitting a
/// UTF-8 sequence
pub fn truncate_utf8(text: &str, width: usize) -> &str {
    if text.len() <= width {
        return text;
    }
    let mut end = width;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one record from a block of exactly `schema.record_size()` bytes
pub fn decode(schema: &Schema, block: &[u8]) -> Result<Record> {
    if block.len() != schema.record_size() {
        return Err(StoreError::Decoding(format!(
            "expected a {}-byte record, got {} bytes",
            schema.record_size(),
            block.len()
        )));
    }

    let mut buf = block;
    let mut record = Record::new(0, String::new(), 0.0);

    for field in schema.fields() {
        match field.kind {
            FieldKind::U32 => {
                let value = buf.get_u32_le();
                match field.column {
                    Column::Quantity => record.quantity = Some(value),
                    _ => record.id = value,
                }
            }
            FieldKind::F32 => record.price = buf.get_f32_le(),
            FieldKind::Text { width } => {
                let text = decode_text(&buf[..width], field.column)?;
                buf.advance(width);
                match field.column {
                    Column::Category => record.category = Some(text),
                    Column::StockStatus => record.stock_status = Some(text),
                    _ => record.name = text,
                }
            }
        }
    }

    Ok(record)
}

/// Strip zero padding and trailing whitespace from a text slot
fn decode_text(slot: &[u8], column: Column) -> Result<String> {
    let end = slot.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let text = std::str::from_utf8(&slot[..end]).map_err(|e| {
        StoreError::Decoding(format!(
            "'{}' slot holds invalid UTF-8: {}",
            column.name(),
            e
        ))
    })?;
    Ok(text.trim_end().to_string())
}
