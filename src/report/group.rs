//! Category grouping

use std::collections::HashMap;

use serde::Serialize;

use crate::schema::Record;
use crate::storage::Scan;

/// Records sharing one category, with their aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    /// `None` for records from a schema without a category slot
    pub category: Option<String>,
    /// Members in file order
    pub records: Vec<Record>,
    pub item_count: usize,
    /// Sum of `price * quantity` (single units without a quantity slot)
    pub total_value: f64,
    /// Sum of quantities (0 without a quantity slot)
    pub total_quantity: u64,
}

impl CategoryGroup {
    fn new(category: Option<String>) -> Self {
        Self {
            category,
            records: Vec::new(),
            item_count: 0,
            total_value: 0.0,
            total_quantity: 0,
        }
    }

    fn push(&mut self, record: Record) {
        self.item_count += 1;
        self.total_value += record.value();
        self.total_quantity += u64::from(record.quantity.unwrap_or(0));
        self.records.push(record);
    }
}

/// Result of grouping a whole store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The data file did not exist
    pub missing: bool,
    /// Groups in order of first appearance
    pub groups: Vec<CategoryGroup>,
    pub total_value: f64,
    pub total_items: usize,
    pub total_quantity: u64,
    pub total_categories: usize,
}

impl Summary {
    /// Look up a group by its exact category
    pub fn group(&self, category: &str) -> Option<&CategoryGroup> {
        self.groups
            .iter()
            .find(|g| g.category.as_deref() == Some(category))
    }

    /// The group of records that have no category slot at all
    pub fn uncategorized(&self) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.category.is_none())
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Group the records of a scan by category
pub fn group_by_category(scan: &Scan) -> Summary {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();

    for record in scan.records() {
        let category = record.category.clone();
        let slot = *index.entry(category.clone()).or_insert_with(|| {
            groups.push(CategoryGroup::new(category));
            groups.len() - 1
        });
        groups[slot].push(record.clone());
    }

    Summary {
        missing: scan.is_missing(),
        total_value: groups.iter().map(|g| g.total_value).sum(),
        total_items: groups.iter().map(|g| g.item_count).sum(),
        total_quantity: groups.iter().map(|g| g.total_quantity).sum(),
        total_categories: groups.len(),
        groups,
    }
}
