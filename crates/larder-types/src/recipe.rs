use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecipeId;

/// One ingredient demand: a reference to a [`crate::StockItem`] by name,
/// not an ownership relation. Units are carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A named, ordered list of ingredient demands plus free-text instructions.
///
/// Exactly one `Recipe` exists per distinct `name`; inserting a name that
/// already exists returns the stored recipe unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe with a fresh ID and current timestamps.
    pub fn new(
        name: impl Into<String>,
        ingredients: Vec<Ingredient>,
        instructions: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecipeId::new(),
            name: name.into(),
            ingredients,
            instructions: instructions.into(),
            category: category.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_preserves_ingredient_order() {
        let recipe = Recipe::new(
            "Classic Burger",
            vec![
                Ingredient::new("beef patty", 1.0, "piece"),
                Ingredient::new("burger bun", 1.0, "piece"),
                Ingredient::new("cheese", 20.0, "g"),
            ],
            "Grill and assemble.",
            "Main",
        );
        assert_eq!(recipe.ingredients[0].name, "beef patty");
        assert_eq!(recipe.ingredients[2].name, "cheese");
    }

    #[test]
    fn serde_roundtrip() {
        let recipe = Recipe::new(
            "Fries",
            vec![Ingredient::new("potatoes", 150.0, "g")],
            "",
            "Side",
        );
        let json = serde_json::to_string(&recipe).unwrap();
        let parsed: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, parsed);
    }
}
