//! Record value

use serde::{Deserialize, Serialize};

use super::Column;

/// One decoded record
///
/// `id`, `name` and `price` exist in every layout. The optional fields are
/// `Some` exactly when the schema has a slot for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub price: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Record {
    /// Create a record with only the always-present fields
    pub fn new(id: u32, name: impl Into<String>, price: f32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: None,
            stock_status: None,
            quantity: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_stock_status(mut self, status: impl Into<String>) -> Self {
        self.stock_status = Some(status.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Whether the record carries a value for `column`
    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::Id | Column::Name | Column::Price => true,
            Column::Category => self.category.is_some(),
            Column::StockStatus => self.stock_status.is_some(),
            Column::Quantity => self.quantity.is_some(),
        }
    }

    /// Lookup rule: `query` equals the decimal id, or equals the trimmed
    /// name ignoring case
    pub fn matches_query(&self, query: &str) -> bool {
        self.id.to_string() == query || self.name.trim().to_lowercase() == query.to_lowercase()
    }

    /// Priced value: `price * quantity`, a record without a quantity slot
    /// counting as a single unit
    pub fn value(&self) -> f64 {
        f64::from(self.price) * f64::from(self.quantity.unwrap_or(1))
    }
}
