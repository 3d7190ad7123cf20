//! Record Codec Module
//!
//! Fixed-width binary layout of a single record and the conversion between
//! a `Record` value and its exact byte representation.
//!
//! ## Responsibilities
//! - Describe the record layout as an ordered list of typed slots (`Schema`)
//! - Pack a `Record` into exactly `record_size()` bytes
//! - Unpack a block of `record_size()` bytes back into a `Record`
//!
//! ## Record Format (stock-status variant, 58 bytes)
//! ```text
//! ┌────────┬──────────────┬─────────┬──────────────┬──────────────┐
//! │ Id (4) │  Name (20)   │Price (4)│Category (20) │  Stock (10)  │
//! │ u32 LE │ UTF-8, 0-pad │ f32 LE  │ UTF-8, 0-pad │ UTF-8, 0-pad │
//! └────────┴──────────────┴─────────┴──────────────┴──────────────┘
//! ```
//!
//! There is no header, footer, magic number or version tag in the data
//! file: a file is nothing but K back-to-back records of the same size.

mod codec;
mod field;
mod record;

pub use codec::{decode, encode, encode_into, truncate_utf8};
pub use field::{Column, FieldKind, FieldSpec, Schema};
pub use record::Record;
