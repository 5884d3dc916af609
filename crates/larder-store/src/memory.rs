//! In-memory store implementations for tests, demos, and embedding.
//!
//! All data lives in a `HashMap` behind a `RwLock` and is lost when the
//! store is dropped. Compound operations (`upsert`, `consume_clamped`,
//! `deduct_all`) run under a single write guard, which gives them the
//! atomicity the trait contracts require.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use larder_types::{
    Ingredient, ItemId, Recipe, RecipeId, Shortfall, StockDelta, StockItem, DEFAULT_CATEGORY,
    DEFAULT_THRESHOLD,
};

use crate::error::{StoreError, StoreResult};
use crate::patch::{ItemPatch, RecipePatch};
use crate::traits::{
    ClampedConsumption, DeductOutcome, InsertedRecipe, InventoryStore, RecipeStore, Updated,
    UpdatedRecipe, Upserted,
};

#[derive(Default)]
struct InventoryState {
    /// Primary mapping, keyed by the unique item name.
    items: HashMap<String, StockItem>,
    /// Secondary index from id to name.
    ids: HashMap<ItemId, String>,
}

/// An in-memory implementation of [`InventoryStore`].
#[derive(Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<InventoryState>,
}

impl InMemoryInventoryStore {
    /// Create a new empty inventory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InventoryState>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InventoryState>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn list(&self) -> StoreResult<Vec<StockItem>> {
        let state = self.read()?;
        let mut items: Vec<_> = state.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn get(&self, name: &str) -> StoreResult<Option<StockItem>> {
        Ok(self.read()?.items.get(name).cloned())
    }

    fn get_by_id(&self, id: ItemId) -> StoreResult<Option<StockItem>> {
        let state = self.read()?;
        Ok(state
            .ids
            .get(&id)
            .and_then(|name| state.items.get(name))
            .cloned())
    }

    fn upsert(
        &self,
        name: &str,
        delta_quantity: f64,
        unit: &str,
        category: &str,
        threshold: f64,
    ) -> StoreResult<Upserted> {
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        if delta_quantity < 0.0 || !delta_quantity.is_finite() {
            return Err(StoreError::InvalidQuantity(delta_quantity));
        }
        if threshold < 0.0 || !threshold.is_finite() {
            return Err(StoreError::InvalidThreshold(threshold));
        }

        let mut state = self.write()?;
        if let Some(item) = state.items.get_mut(name) {
            item.quantity += delta_quantity;
            item.touch();
            debug!(name, delta_quantity, quantity = item.quantity, "stock incremented");
            return Ok(Upserted {
                item: item.clone(),
                created: false,
            });
        }

        let item = StockItem::new(name, delta_quantity, unit, category, threshold);
        state.ids.insert(item.id, name.to_string());
        state.items.insert(name.to_string(), item.clone());
        debug!(name, quantity = delta_quantity, "stock item created");
        Ok(Upserted {
            item,
            created: true,
        })
    }

    fn update(&self, id: ItemId, patch: &ItemPatch) -> StoreResult<Updated> {
        patch.validate()?;

        let mut state = self.write()?;
        let old_name = state
            .ids
            .get(&id)
            .cloned()
            .ok_or(StoreError::ItemNotFound(id))?;

        if let Some(new_name) = &patch.name {
            if *new_name != old_name && state.items.contains_key(new_name) {
                return Err(StoreError::NameTaken(new_name.clone()));
            }
        }

        let item = state
            .items
            .get_mut(&old_name)
            .ok_or(StoreError::ItemNotFound(id))?;
        let previous_quantity = item.quantity;
        let changed = patch.apply(item);
        if !changed {
            return Ok(Updated {
                item: item.clone(),
                previous_quantity,
                changed: false,
            });
        }
        item.touch();
        let updated = item.clone();

        // Re-key both maps on rename.
        if updated.name != old_name {
            state.items.remove(&old_name);
            state.ids.insert(id, updated.name.clone());
            state.items.insert(updated.name.clone(), updated.clone());
        }

        debug!(name = %updated.name, "stock item updated");
        Ok(Updated {
            item: updated,
            previous_quantity,
            changed: true,
        })
    }

    fn delete(&self, id: ItemId) -> StoreResult<bool> {
        let mut state = self.write()?;
        match state.ids.remove(&id) {
            Some(name) => {
                state.items.remove(&name);
                debug!(name = %name, "stock item deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn consume_clamped(
        &self,
        name: &str,
        demand: f64,
        unit: &str,
    ) -> StoreResult<ClampedConsumption> {
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        if demand < 0.0 || !demand.is_finite() {
            return Err(StoreError::InvalidQuantity(demand));
        }

        let mut state = self.write()?;
        let mut created = false;
        if !state.items.contains_key(name) {
            // Zero-quantity placeholder so the ingredient becomes trackable.
            let item = StockItem::new(name, 0.0, unit, DEFAULT_CATEGORY, DEFAULT_THRESHOLD);
            state.ids.insert(item.id, name.to_string());
            state.items.insert(name.to_string(), item);
            created = true;
        }

        let item = state
            .items
            .get_mut(name)
            .expect("placeholder inserted above");
        let previous = item.quantity;
        item.quantity = (previous - demand).max(0.0);
        item.touch();
        let new_quantity = item.quantity;

        debug!(name, previous, demand, new_quantity, "stock consumed (clamped)");
        Ok(ClampedConsumption {
            delta: StockDelta {
                name: name.to_string(),
                previous_quantity: previous,
                used_quantity: demand,
                new_quantity,
                unit: unit.to_string(),
            },
            created,
        })
    }

    fn deduct_all(&self, demands: &[Ingredient]) -> StoreResult<DeductOutcome> {
        for demand in demands {
            if demand.quantity < 0.0 || !demand.quantity.is_finite() {
                return Err(StoreError::InvalidQuantity(demand.quantity));
            }
        }

        // Entries sharing a name must be checked against their cumulative
        // demand, so duplicates are summed first (first-seen order and
        // unit win).
        let mut combined: Vec<Ingredient> = Vec::with_capacity(demands.len());
        for demand in demands {
            match combined.iter_mut().find(|c| c.name == demand.name) {
                Some(existing) => existing.quantity += demand.quantity,
                None => combined.push(demand.clone()),
            }
        }

        let mut state = self.write()?;

        // Check phase: scan every demand before mutating anything.
        let mut shortfalls = Vec::new();
        for demand in &combined {
            let available = state.items.get(&demand.name).map(|item| item.quantity);
            match available {
                Some(available) if available >= demand.quantity => {}
                _ => shortfalls.push(Shortfall {
                    name: demand.name.clone(),
                    required: demand.quantity,
                    available: available.unwrap_or(0.0),
                    unit: demand.unit.clone(),
                }),
            }
        }
        if !shortfalls.is_empty() {
            debug!(count = shortfalls.len(), "deduction rejected: insufficient stock");
            return Ok(DeductOutcome::Insufficient(shortfalls));
        }

        // Commit phase: the write guard has been held since the check, so
        // nothing can have reduced any quantity in between.
        let mut deltas = Vec::with_capacity(combined.len());
        for demand in &combined {
            let item = state
                .items
                .get_mut(&demand.name)
                .expect("presence verified in check phase");
            let previous = item.quantity;
            item.quantity = previous - demand.quantity;
            item.touch();
            deltas.push(StockDelta {
                name: demand.name.clone(),
                previous_quantity: previous,
                used_quantity: demand.quantity,
                new_quantity: item.quantity,
                unit: demand.unit.clone(),
            });
        }
        debug!(count = deltas.len(), "deduction committed");
        Ok(DeductOutcome::Applied(deltas))
    }

    fn list_below_threshold(&self) -> StoreResult<Vec<StockItem>> {
        let state = self.read()?;
        let mut items: Vec<_> = state
            .items
            .values()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

#[derive(Default)]
struct RecipeState {
    recipes: HashMap<String, Recipe>,
    ids: HashMap<RecipeId, String>,
}

/// An in-memory implementation of [`RecipeStore`].
#[derive(Default)]
pub struct InMemoryRecipeStore {
    inner: RwLock<RecipeState>,
}

impl InMemoryRecipeStore {
    /// Create a new empty recipe store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, RecipeState>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, RecipeState>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn list(&self) -> StoreResult<Vec<Recipe>> {
        let state = self.read()?;
        let mut recipes: Vec<_> = state.recipes.values().cloned().collect();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(recipes)
    }

    fn get_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        let state = self.read()?;
        Ok(state
            .ids
            .get(&id)
            .and_then(|name| state.recipes.get(name))
            .cloned())
    }

    fn insert_if_absent(
        &self,
        name: &str,
        ingredients: Vec<Ingredient>,
        instructions: &str,
        category: &str,
    ) -> StoreResult<InsertedRecipe> {
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        for ingredient in &ingredients {
            if ingredient.name.is_empty() {
                return Err(StoreError::InvalidName);
            }
            if ingredient.quantity < 0.0 || !ingredient.quantity.is_finite() {
                return Err(StoreError::InvalidQuantity(ingredient.quantity));
            }
        }

        let mut state = self.write()?;
        if let Some(existing) = state.recipes.get(name) {
            // Idempotent: the new ingredient list is ignored.
            return Ok(InsertedRecipe {
                recipe: existing.clone(),
                created: false,
            });
        }

        let recipe = Recipe::new(name, ingredients, instructions, category);
        state.ids.insert(recipe.id, name.to_string());
        state.recipes.insert(name.to_string(), recipe.clone());
        debug!(name, "recipe created");
        Ok(InsertedRecipe {
            recipe,
            created: true,
        })
    }

    fn update(&self, id: RecipeId, patch: &RecipePatch) -> StoreResult<UpdatedRecipe> {
        patch.validate()?;

        let mut state = self.write()?;
        let old_name = state
            .ids
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecipeNotFound(id))?;

        if let Some(new_name) = &patch.name {
            if *new_name != old_name && state.recipes.contains_key(new_name) {
                return Err(StoreError::NameTaken(new_name.clone()));
            }
        }

        let recipe = state
            .recipes
            .get_mut(&old_name)
            .ok_or(StoreError::RecipeNotFound(id))?;
        let changed = patch.apply(recipe);
        if !changed {
            return Ok(UpdatedRecipe {
                recipe: recipe.clone(),
                changed: false,
            });
        }
        recipe.touch();
        let updated = recipe.clone();

        if updated.name != old_name {
            state.recipes.remove(&old_name);
            state.ids.insert(id, updated.name.clone());
            state.recipes.insert(updated.name.clone(), updated.clone());
        }

        debug!(name = %updated.name, "recipe updated");
        Ok(UpdatedRecipe {
            recipe: updated,
            changed: true,
        })
    }

    fn delete(&self, id: RecipeId) -> StoreResult<bool> {
        let mut state = self.write()?;
        match state.ids.remove(&id) {
            Some(name) => {
                state.recipes.remove(&name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
