use serde::{Deserialize, Serialize};

use crate::recipe::Ingredient;

/// One detected dish kind and how many instances of it were seen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishCount {
    pub name: String,
    pub count: u32,
}

impl DishCount {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// An externally supplied detection result: dish counts plus the
/// pre-aggregated ingredient demand they imply.
///
/// The detection collaborator aggregates `ingredients_needed` before
/// handing the batch over; the engine does not run detection itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    pub detected_dishes: Vec<DishCount>,
    pub ingredients_needed: Vec<Ingredient>,
}

/// Per-ingredient result of one quantity mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockDelta {
    pub name: String,
    pub previous_quantity: f64,
    pub used_quantity: f64,
    pub new_quantity: f64,
    pub unit: String,
}

/// One insufficiency record from recipe preparation: what was required
/// versus what was available.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub name: String,
    pub required: f64,
    pub available: f64,
    pub unit: String,
}

/// Render dish counts for transaction descriptions,
/// e.g. `burger (x2), fries (x1)`.
pub fn summarize_dishes(dishes: &[DishCount]) -> String {
    dishes
        .iter()
        .map(|dish| format!("{} (x{})", dish.name, dish.count))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_lists_every_dish() {
        let dishes = vec![DishCount::new("burger", 2), DishCount::new("fries", 1)];
        assert_eq!(summarize_dishes(&dishes), "burger (x2), fries (x1)");
    }

    #[test]
    fn summarize_empty_is_empty() {
        assert_eq!(summarize_dishes(&[]), "");
    }

    #[test]
    fn batch_serde_roundtrip() {
        let batch = DetectionBatch {
            detected_dishes: vec![DishCount::new("burger", 2)],
            ingredients_needed: vec![Ingredient::new("cheese", 40.0, "g")],
        };
        let json = serde_json::to_string(&batch).unwrap();
        let parsed: DetectionBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(batch, parsed);
    }

    #[test]
    fn batch_deserializes_from_detector_shape() {
        let json = r#"{
            "detected_dishes": [{"name": "pizza", "count": 1}],
            "ingredients_needed": [{"name": "cheese", "quantity": 100, "unit": "g"}]
        }"#;
        let batch: DetectionBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.detected_dishes[0].count, 1);
        assert_eq!(batch.ingredients_needed[0].quantity, 100.0);
    }
}
