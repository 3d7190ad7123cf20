//! Tests for the schema descriptor
//!
//! These tests verify:
//! - Preset layouts and their record sizes
//! - Validation of custom layouts
//! - Slot offsets

use slotstore::{Column, FieldKind, FieldSpec, Schema, StoreError};

// =============================================================================
// Presets
// =============================================================================

#[test]
fn test_stock_status_preset_is_58_bytes() {
    let schema = Schema::stock_status();

    assert_eq!(schema.record_size(), 4 + 20 + 4 + 20 + 10);
    assert!(schema.has(Column::StockStatus));
    assert!(!schema.has(Column::Quantity));
}

#[test]
fn test_quantity_preset_is_52_bytes() {
    let schema = Schema::quantity();

    assert_eq!(schema.record_size(), 52);
    assert!(schema.has(Column::Quantity));
    assert!(!schema.has(Column::StockStatus));
}

#[test]
fn test_layout_offsets() {
    let schema = Schema::stock_status();
    let offsets: Vec<(usize, Column)> = schema.layout().map(|(o, f)| (o, f.column)).collect();

    assert_eq!(
        offsets,
        vec![
            (0, Column::Id),
            (4, Column::Name),
            (24, Column::Price),
            (28, Column::Category),
            (48, Column::StockStatus),
        ]
    );
}

// =============================================================================
// Custom Layouts
// =============================================================================

#[test]
fn test_custom_layout_with_narrow_slots() {
    let schema = Schema::new(vec![
        FieldSpec::u32(Column::Id),
        FieldSpec::text(Column::Name, 15),
        FieldSpec::f32(Column::Price),
        FieldSpec::text(Column::Category, 15),
    ])
    .unwrap();

    assert_eq!(schema.record_size(), 38);
    assert_eq!(
        schema.field(Column::Name).map(|f| f.kind),
        Some(FieldKind::Text { width: 15 })
    );
}

#[test]
fn test_missing_required_column_rejected() {
    let result = Schema::new(vec![
        FieldSpec::u32(Column::Id),
        FieldSpec::text(Column::Name, 20),
    ]);

    match result {
        Err(StoreError::Schema(msg)) => assert!(msg.contains("price")),
        other => panic!("Expected schema error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_column_rejected() {
    let result = Schema::new(vec![
        FieldSpec::u32(Column::Id),
        FieldSpec::text(Column::Name, 20),
        FieldSpec::text(Column::Name, 10),
        FieldSpec::f32(Column::Price),
    ]);

    assert!(matches!(result, Err(StoreError::Schema(_))));
}

#[test]
fn test_wrong_kind_rejected() {
    let result = Schema::new(vec![
        FieldSpec::text(Column::Id, 4),
        FieldSpec::text(Column::Name, 20),
        FieldSpec::f32(Column::Price),
    ]);

    assert!(matches!(result, Err(StoreError::Schema(_))));
}

#[test]
fn test_zero_width_text_rejected() {
    let result = Schema::new(vec![
        FieldSpec::u32(Column::Id),
        FieldSpec::text(Column::Name, 0),
        FieldSpec::f32(Column::Price),
    ]);

    assert!(matches!(result, Err(StoreError::Schema(_))));
}

#[test]
fn test_huge_text_width_is_an_error_not_a_panic() {
    let result = Schema::new(vec![
        FieldSpec::u32(Column::Id),
        FieldSpec::text(Column::Name, usize::MAX),
        FieldSpec::f32(Column::Price),
    ]);

    match result {
        Err(StoreError::Schema(msg)) => assert!(msg.contains("name")),
        other => panic!("Expected schema error, got {:?}", other),
    }
}

#[test]
fn test_slot_width_limit() {
    let layout = |width: usize| {
        Schema::new(vec![
            FieldSpec::u32(Column::Id),
            FieldSpec::text(Column::Name, width),
            FieldSpec::f32(Column::Price),
            FieldSpec::text(Column::Category, width),
        ])
    };

    let widest = layout(Schema::MAX_SLOT_WIDTH).unwrap();
    assert_eq!(widest.record_size(), 8 + 2 * Schema::MAX_SLOT_WIDTH);

    assert!(matches!(
        layout(Schema::MAX_SLOT_WIDTH + 1),
        Err(StoreError::Schema(_))
    ));
}
