use serde::{Deserialize, Serialize};

use larder_types::{Ingredient, Recipe, StockItem};

use crate::error::{StoreError, StoreResult};

/// Partial update for a stock item.
///
/// The updatable field set is explicit: unknown or type-mismatched fields
/// are unrepresentable, unlike the dynamic field maps this replaces. Every
/// field is validated before any value is merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub threshold: Option<f64>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate field values without touching any record.
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(StoreError::InvalidName);
            }
        }
        if let Some(quantity) = self.quantity {
            if quantity < 0.0 || !quantity.is_finite() {
                return Err(StoreError::InvalidQuantity(quantity));
            }
        }
        if let Some(threshold) = self.threshold {
            if threshold < 0.0 || !threshold.is_finite() {
                return Err(StoreError::InvalidThreshold(threshold));
            }
        }
        Ok(())
    }

    /// Merge into `item`. Returns `true` if any stored value changed,
    /// which is distinct from "the record exists" (a value-level no-op
    /// patch applies successfully with `false`).
    pub fn apply(&self, item: &mut StockItem) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name {
            if item.name != *name {
                item.name = name.clone();
                changed = true;
            }
        }
        if let Some(quantity) = self.quantity {
            if item.quantity != quantity {
                item.quantity = quantity;
                changed = true;
            }
        }
        if let Some(unit) = &self.unit {
            if item.unit != *unit {
                item.unit = unit.clone();
                changed = true;
            }
        }
        if let Some(category) = &self.category {
            if item.category != *category {
                item.category = category.clone();
                changed = true;
            }
        }
        if let Some(threshold) = self.threshold {
            if item.threshold != threshold {
                item.threshold = threshold;
                changed = true;
            }
        }
        changed
    }
}

/// Partial update for a recipe. Same explicit-field rules as [`ItemPatch`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<String>,
    pub category: Option<String>,
}

impl RecipePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = Some(ingredients);
        self
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> StoreResult<()> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(StoreError::InvalidName);
            }
        }
        if let Some(ingredients) = &self.ingredients {
            for ingredient in ingredients {
                if ingredient.name.is_empty() {
                    return Err(StoreError::InvalidName);
                }
                if ingredient.quantity < 0.0 || !ingredient.quantity.is_finite() {
                    return Err(StoreError::InvalidQuantity(ingredient.quantity));
                }
            }
        }
        Ok(())
    }

    /// Merge into `recipe`. Returns `true` if any stored value changed.
    pub fn apply(&self, recipe: &mut Recipe) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name {
            if recipe.name != *name {
                recipe.name = name.clone();
                changed = true;
            }
        }
        if let Some(ingredients) = &self.ingredients {
            if recipe.ingredients != *ingredients {
                recipe.ingredients = ingredients.clone();
                changed = true;
            }
        }
        if let Some(instructions) = &self.instructions {
            if recipe.instructions != *instructions {
                recipe.instructions = instructions.clone();
                changed = true;
            }
        }
        if let Some(category) = &self.category {
            if recipe.category != *category {
                recipe.category = category.clone();
                changed = true;
            }
        }
        changed
    }
}
