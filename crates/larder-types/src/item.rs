use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Category assigned when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Low-stock threshold assigned when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// A named, quantified inventory record with a low-stock threshold.
///
/// Exactly one `StockItem` exists per distinct `name` (case-sensitive, no
/// normalization). `quantity` never goes below zero: every mutation path
/// either rejects negative input or clamps the result at zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: f64,
    /// Unit label (e.g. "g", "ml", "piece"). Not validated against a unit
    /// system; units are assumed consistent per item name.
    pub unit: String,
    pub category: String,
    /// Quantities strictly below this value count as low stock.
    pub threshold: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Create a new item with a fresh ID and current timestamps.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        category: impl Into<String>,
        threshold: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: category.into(),
            threshold,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether this item counts as low stock (strictly below threshold;
    /// equality is not low stock).
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_sets_matching_timestamps() {
        let item = StockItem::new("cheese", 100.0, "g", DEFAULT_CATEGORY, 20.0);
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(item.quantity, 100.0);
    }

    #[test]
    fn touch_advances_updated_at() {
        let mut item = StockItem::new("cheese", 100.0, "g", "Dairy", 20.0);
        let before = item.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        item.touch();
        assert!(item.updated_at > before);
        assert_eq!(item.created_at, before.min(item.created_at));
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        let mut item = StockItem::new("salt", 10.0, "g", DEFAULT_CATEGORY, 10.0);
        assert!(!item.is_low_stock());
        item.quantity = 9.99;
        assert!(item.is_low_stock());
        item.quantity = 10.01;
        assert!(!item.is_low_stock());
    }

    #[test]
    fn serde_roundtrip() {
        let item = StockItem::new("tomato", 2000.0, "g", "Vegetable", 300.0);
        let json = serde_json::to_string(&item).unwrap();
        let parsed: StockItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }
}
