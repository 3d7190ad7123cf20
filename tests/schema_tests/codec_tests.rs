//! Codec Tests
//!
//! Tests for encoding and decoding single fixed-size records.

use slotstore::schema::{decode, encode, truncate_utf8};
use slotstore::{Column, Record, Schema, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn pen() -> Record {
    Record::new(1, "Pen", 5.5)
        .with_category("Office")
        .with_stock_status("In Stock")
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_exact_size() {
    let schema = Schema::stock_status();
    let bytes = encode(&schema, &pen()).unwrap();

    assert_eq!(bytes.len(), 58);
}

#[test]
fn test_encode_byte_layout() {
    let schema = Schema::stock_status();
    let bytes = encode(&schema, &pen()).unwrap();

    assert_eq!(&bytes[0..4], &1u32.to_le_bytes());
    assert_eq!(&bytes[4..7], b"Pen");
    assert!(bytes[7..24].iter().all(|&b| b == 0));
    assert_eq!(&bytes[24..28], &5.5f32.to_le_bytes());
    assert_eq!(&bytes[28..34], b"Office");
    assert!(bytes[34..48].iter().all(|&b| b == 0));
    assert_eq!(&bytes[48..56], b"In Stock");
    assert_eq!(&bytes[56..58], &[0, 0]);
}

#[test]
fn test_encode_quantity_layout() {
    let schema = Schema::quantity();
    let record = Record::new(7, "Bolt", 0.25)
        .with_category("Hardware")
        .with_quantity(400);
    let bytes = encode(&schema, &record).unwrap();

    assert_eq!(bytes.len(), 52);
    assert_eq!(&bytes[48..52], &400u32.to_le_bytes());
}

#[test]
fn test_encode_missing_field_fails() {
    let schema = Schema::stock_status();
    let record = Record::new(1, "Pen", 5.5).with_category("Office");

    match encode(&schema, &record) {
        Err(StoreError::Encoding(msg)) => assert!(msg.contains("stock_status")),
        other => panic!("Expected encoding error, got {:?}", other),
    }
}

#[test]
fn test_encode_foreign_field_fails() {
    let schema = Schema::stock_status();
    let record = pen().with_quantity(3);

    assert!(matches!(
        encode(&schema, &record),
        Err(StoreError::Encoding(_))
    ));
}

#[test]
fn test_encode_non_finite_price_fails() {
    let schema = Schema::stock_status();
    let mut record = pen();
    record.price = f32::NAN;

    assert!(matches!(
        encode(&schema, &record),
        Err(StoreError::Encoding(_))
    ));
}

// =============================================================================
// Round Trip / Truncation
// =============================================================================

#[test]
fn test_decode_inverts_encode() {
    let schema = Schema::stock_status();
    let record = pen();

    let decoded = decode(&schema, &encode(&schema, &record).unwrap()).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn test_long_name_truncated_to_slot() {
    let schema = Schema::stock_status();
    let record = Record::new(2, "An extremely long product name", 1.0)
        .with_category("Office")
        .with_stock_status("Out of Stock");

    let decoded = decode(&schema, &encode(&schema, &record).unwrap()).unwrap();

    assert_eq!(decoded.name, "An extremely long pr");
    assert_eq!(decoded.name.len(), 20);
    // "Out of Stock" is 12 bytes, the slot is 10
    assert_eq!(decoded.stock_status.as_deref(), Some("Out of Sto"));
}

#[test]
fn test_multibyte_truncation_is_char_safe() {
    let schema = Schema::stock_status();
    // 19 ASCII bytes + 'é' (2 bytes) does not fit in 20
    let name = format!("{}é", "a".repeat(19));
    let record = Record::new(3, name, 1.0)
        .with_category("Café")
        .with_stock_status("In Stock");

    let decoded = decode(&schema, &encode(&schema, &record).unwrap()).unwrap();

    assert_eq!(decoded.name, "a".repeat(19));
    assert_eq!(decoded.category.as_deref(), Some("Café"));
    assert_eq!(truncate_utf8("日本語", 4), "日");
}

#[test]
fn test_trailing_whitespace_trimmed_on_decode() {
    let schema = Schema::stock_status();
    let record = Record::new(4, "Lamp   ", 20.0)
        .with_category("Home")
        .with_stock_status("In Stock");

    let decoded = decode(&schema, &encode(&schema, &record).unwrap()).unwrap();
    assert_eq!(decoded.name, "Lamp");
}

/// One row of the edge-value table: what goes in, and what the slots keep
struct EdgeCase {
    id: u32,
    name: String,
    price: f32,
    category: String,
    stock_status: &'static str,
    quantity: u32,
    expect_name: String,
    expect_category: String,
    expect_stock_status: &'static str,
}

fn edge_cases() -> Vec<EdgeCase> {
    let exact = "x".repeat(20);
    // 18 ASCII bytes + 'é' fills the 20-byte slot exactly
    let multibyte_fits = format!("{}é", "b".repeat(18));
    // 19 ASCII bytes + 'é' straddles the boundary, so 'é' is dropped
    let multibyte_straddles = format!("{}é", "c".repeat(19));

    let case = |id, name: &str, price, category: &str, expect_name: &str| EdgeCase {
        id,
        name: name.to_string(),
        price,
        category: category.to_string(),
        stock_status: "In Stock",
        quantity: 1,
        expect_name: expect_name.to_string(),
        expect_category: category.to_string(),
        expect_stock_status: "In Stock",
    };

    vec![
        case(0, "zero id", 1.0, "Office", "zero id"),
        EdgeCase {
            quantity: u32::MAX,
            ..case(u32::MAX, "max id", 1.0, "Office", "max id")
        },
        EdgeCase {
            quantity: 0,
            ..case(7, "free", 0.0, "Office", "free")
        },
        case(8, "refund", -12.75, "Returns", "refund"),
        case(9, "subnormal", f32::MIN_POSITIVE / 2.0, "Lab", "subnormal"),
        case(10, "negative zero", -0.0, "Lab", "negative zero"),
        EdgeCase {
            stock_status: "",
            expect_stock_status: "",
            ..case(11, "", 3.0, "", "")
        },
        case(12, &exact, 2.0, &exact, &exact),
        case(13, &multibyte_fits, 2.0, &multibyte_fits, &multibyte_fits),
        EdgeCase {
            expect_category: "c".repeat(19),
            ..case(
                14,
                &multibyte_straddles,
                2.0,
                &multibyte_straddles,
                &"c".repeat(19),
            )
        },
        EdgeCase {
            stock_status: "Backordered",
            expect_stock_status: "Backordere",
            ..case(15, "status overflow", 2.0, "Office", "status overflow")
        },
    ]
}

#[test]
fn test_edge_values_survive_both_layouts() {
    for schema in [Schema::stock_status(), Schema::quantity()] {
        let with_status = schema.has(Column::StockStatus);

        for case in edge_cases() {
            let base = Record::new(case.id, case.name.clone(), case.price)
                .with_category(case.category.clone());
            let record = if with_status {
                base.with_stock_status(case.stock_status)
            } else {
                base.with_quantity(case.quantity)
            };

            let bytes = encode(&schema, &record).unwrap();
            assert_eq!(bytes.len(), schema.record_size(), "id {}", case.id);
            let decoded = decode(&schema, &bytes).unwrap();

            assert_eq!(decoded.id, case.id);
            assert_eq!(decoded.name, case.expect_name, "id {}", case.id);
            assert_eq!(
                decoded.price.to_bits(),
                case.price.to_bits(),
                "id {}",
                case.id
            );
            assert_eq!(
                decoded.category.as_deref(),
                Some(case.expect_category.as_str()),
                "id {}",
                case.id
            );
            if with_status {
                assert_eq!(
                    decoded.stock_status.as_deref(),
                    Some(case.expect_stock_status),
                    "id {}",
                    case.id
                );
                assert_eq!(decoded.quantity, None);
            } else {
                assert_eq!(decoded.quantity, Some(case.quantity), "id {}", case.id);
                assert_eq!(decoded.stock_status, None);
            }
        }
    }
}

// =============================================================================
// Decoding Errors
// =============================================================================

#[test]
fn test_decode_wrong_length_fails() {
    let schema = Schema::stock_status();

    assert!(matches!(
        decode(&schema, &[0u8; 57]),
        Err(StoreError::Decoding(_))
    ));
    assert!(matches!(
        decode(&schema, &[0u8; 59]),
        Err(StoreError::Decoding(_))
    ));
}

#[test]
fn test_decode_invalid_utf8_fails() {
    let schema = Schema::stock_status();
    let mut bytes = encode(&schema, &pen()).unwrap().to_vec();
    bytes[4] = 0xFF;

    match decode(&schema, &bytes) {
        Err(StoreError::Decoding(msg)) => assert!(msg.contains("name")),
        other => panic!("Expected decoding error, got {:?}", other),
    }
}

#[test]
fn test_decode_all_zero_block() {
    let schema = Schema::stock_status();
    let record = decode(&schema, &[0u8; 58]).unwrap();

    assert_eq!(record.id, 0);
    assert_eq!(record.name, "");
    assert_eq!(record.price, 0.0);
    assert_eq!(record.category.as_deref(), Some(""));
}
