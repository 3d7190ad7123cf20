//! Record Reader
//!
//! Sequential iteration over the fixed-size records of a data file.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use bytes::{Bytes, BytesMut};

use crate::error::{Result, StoreError};
use crate::schema::{self, Record, Schema};

/// One raw record block and where it starts in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub offset: u64,
    pub bytes: Bytes,
}

impl Block {
    /// Decode the block, reporting failures as corruption at its offset
    pub fn decode(&self, schema: &Schema) -> Result<Record> {
        schema::decode(schema, &self.bytes).map_err(|e| match e {
            StoreError::Decoding(reason) => StoreError::corruption(self.offset, reason),
            other => other,
        })
    }
}

/// Reads N-byte blocks from offset 0 to EOF, in file order
///
/// Fails with `Corruption` on a trailing partial block instead of silently
/// dropping it. After the first error the iterator is exhausted.
pub struct RecordReader<'a, R = File> {
    reader: BufReader<R>,
    schema: &'a Schema,
    /// Offset of the next block to read
    offset: u64,
    done: bool,
}

impl<'a> RecordReader<'a, File> {
    /// Open a data file for scanning
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn open(path: &Path, schema: &'a Schema) -> Result<Option<Self>> {
        match File::open(path) {
            Ok(file) => Ok(Some(Self::from_reader(file, schema))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, R: Read> RecordReader<'a, R> {
    /// Scan records from any byte source
    pub fn from_reader(reader: R, schema: &'a Schema) -> Self {
        Self {
            reader: BufReader::new(reader),
            schema,
            offset: 0,
            done: false,
        }
    }

    /// Read the next raw block, or `None` at a clean EOF
    pub fn next_block(&mut self) -> Result<Option<Block>> {
        if self.done {
            return Ok(None);
        }

        let size = self.schema.record_size();
        let mut buf = BytesMut::zeroed(size);
        let filled = match read_full(&mut self.reader, &mut buf) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Err(e.into());
            }
        };

        if filled == 0 {
            self.done = true;
            return Ok(None);
        }

        if filled < size {
            self.done = true;
            tracing::warn!(
                offset = self.offset,
                trailing = filled,
                record_size = size,
                "partial record at end of data file"
            );
            return Err(StoreError::corruption(
                self.offset,
                format!(
                    "trailing partial record of {} bytes (record size is {})",
                    filled, size
                ),
            ));
        }

        let block = Block {
            offset: self.offset,
            bytes: buf.freeze(),
        };
        self.offset += size as u64;
        Ok(Some(block))
    }

    /// Byte offset of the next block
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl<'a, R: Read> Iterator for RecordReader<'a, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let block = match self.next_block() {
            Ok(Some(block)) => block,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };

        let decoded = block.decode(self.schema);
        if decoded.is_err() {
            self.done = true;
        }
        Some(decoded)
    }
}

/// Fill `buf` as far as the source allows; returns bytes read
///
/// Short only at EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
