use std::sync::Arc;

use tracing::info;

use larder_ledger::{
    InMemoryTransactionLog, Transaction, TransactionInput, TransactionLog, TxAction,
};
use larder_store::{
    InMemoryInventoryStore, InMemoryRecipeStore, InventoryStore, ItemPatch, RecipePatch,
    RecipeStore, Updated, UpdatedRecipe,
};
use larder_types::{
    DetectionBatch, DishCount, Ingredient, ItemId, Recipe, RecipeId, StockItem, DEFAULT_CATEGORY,
    DEFAULT_THRESHOLD,
};

use crate::catalog::DishCatalog;
use crate::consumption::{self, ConsumptionReport};
use crate::error::{EngineError, EngineResult};
use crate::preparation::{self, PreparationReport};

/// High-level Larder API: the surface exposed to the routing layer.
///
/// Holds explicit store and log handles with explicit lifecycle — built at
/// startup, dropped at shutdown — rather than module-level state. All
/// operations are synchronous; the handles are `Send + Sync` so the
/// service can be shared across concurrent callers.
pub struct Larder {
    inventory: Arc<dyn InventoryStore>,
    recipes: Arc<dyn RecipeStore>,
    log: Arc<dyn TransactionLog>,
    catalog: DishCatalog,
}

impl Larder {
    /// Build a service over the given store and log handles, with the
    /// default dish catalog.
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        recipes: Arc<dyn RecipeStore>,
        log: Arc<dyn TransactionLog>,
    ) -> Self {
        Self {
            inventory,
            recipes,
            log,
            catalog: DishCatalog::default(),
        }
    }

    /// Replace the dish catalog.
    pub fn with_catalog(mut self, catalog: DishCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// A fully in-memory service for tests, demos, and embedding.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryInventoryStore::new()),
            Arc::new(InMemoryRecipeStore::new()),
            Arc::new(InMemoryTransactionLog::new()),
        )
    }

    pub fn catalog(&self) -> &DishCatalog {
        &self.catalog
    }

    // ---- Inventory operations ----

    pub fn list_inventory(&self) -> EngineResult<Vec<StockItem>> {
        Ok(self.inventory.list()?)
    }

    /// Add stock. A new name creates the item and journals "Initial
    /// stock"; an existing name has the quantity added to it (an
    /// increment, not a replace) and journals "Restock".
    pub fn add_inventory_item(
        &self,
        name: &str,
        quantity: f64,
        unit: &str,
        category: Option<&str>,
        threshold: Option<f64>,
    ) -> EngineResult<StockItem> {
        let upserted = self.inventory.upsert(
            name,
            quantity,
            unit,
            category.unwrap_or(DEFAULT_CATEGORY),
            threshold.unwrap_or(DEFAULT_THRESHOLD),
        )?;

        let description = if upserted.created {
            "Initial stock"
        } else {
            "Restock"
        };
        self.log.append(TransactionInput::new(
            TxAction::Add,
            name,
            quantity,
            unit,
            description,
        ))?;

        info!(name, quantity, created = upserted.created, "inventory add");
        Ok(upserted.item)
    }

    /// Patch an item. A quantity-changing patch journals one signed
    /// "Manual adjustment" transaction; other field changes do not touch
    /// the ledger.
    pub fn update_inventory_item(&self, id: ItemId, patch: &ItemPatch) -> EngineResult<Updated> {
        let updated = self.inventory.update(id, patch)?;

        if updated.changed && updated.item.quantity != updated.previous_quantity {
            let delta = updated.item.quantity - updated.previous_quantity;
            let action = if delta >= 0.0 {
                TxAction::Add
            } else {
                TxAction::Subtract
            };
            self.log.append(TransactionInput::new(
                action,
                &updated.item.name,
                delta.abs(),
                &updated.item.unit,
                "Manual adjustment",
            ))?;
        }

        Ok(updated)
    }

    pub fn delete_inventory_item(&self, id: ItemId) -> EngineResult<bool> {
        Ok(self.inventory.delete(id)?)
    }

    /// Items strictly below their low-stock threshold.
    pub fn list_low_stock(&self) -> EngineResult<Vec<StockItem>> {
        Ok(self.inventory.list_below_threshold()?)
    }

    // ---- Recipe operations ----

    pub fn list_recipes(&self) -> EngineResult<Vec<Recipe>> {
        Ok(self.recipes.list()?)
    }

    /// Insert a recipe unless the name already exists; re-inserting
    /// returns the stored recipe unchanged.
    pub fn add_recipe(
        &self,
        name: &str,
        ingredients: Vec<Ingredient>,
        instructions: Option<&str>,
        category: Option<&str>,
    ) -> EngineResult<Recipe> {
        let inserted = self.recipes.insert_if_absent(
            name,
            ingredients,
            instructions.unwrap_or(""),
            category.unwrap_or(DEFAULT_CATEGORY),
        )?;
        Ok(inserted.recipe)
    }

    pub fn update_recipe(&self, id: RecipeId, patch: &RecipePatch) -> EngineResult<UpdatedRecipe> {
        Ok(self.recipes.update(id, patch)?)
    }

    pub fn delete_recipe(&self, id: RecipeId) -> EngineResult<bool> {
        Ok(self.recipes.delete(id)?)
    }

    // ---- Consumption and preparation ----

    /// Apply an externally aggregated detection batch (clamp-at-zero,
    /// never rejects on insufficiency).
    pub fn consume_from_detection_batch(
        &self,
        batch: &DetectionBatch,
    ) -> EngineResult<ConsumptionReport> {
        consumption::consume_batch(self.inventory.as_ref(), self.log.as_ref(), batch)
    }

    /// Aggregate raw dish counts through the catalog, then consume.
    pub fn consume_detected(&self, dishes: &[DishCount]) -> EngineResult<ConsumptionReport> {
        let ingredients_needed = self.catalog.aggregate(dishes);
        if ingredients_needed.is_empty() {
            return Err(EngineError::Validation(
                "no catalog ingredients for the detected dishes".into(),
            ));
        }
        let batch = DetectionBatch {
            detected_dishes: dishes.to_vec(),
            ingredients_needed,
        };
        self.consume_from_detection_batch(&batch)
    }

    /// Prepare a recipe: all ingredients are deducted atomically, or the
    /// call fails with every shortfall and no stock changes.
    pub fn prepare_recipe(&self, id: RecipeId) -> EngineResult<PreparationReport> {
        preparation::prepare(
            self.inventory.as_ref(),
            self.recipes.as_ref(),
            self.log.as_ref(),
            id,
        )
    }

    // ---- Audit ----

    pub fn transactions(&self) -> EngineResult<Vec<Transaction>> {
        Ok(self.log.read_all()?)
    }

    pub fn transactions_for_item(&self, name: &str) -> EngineResult<Vec<Transaction>> {
        Ok(self.log.read_for_item(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_log() -> (Larder, Arc<InMemoryTransactionLog>) {
        let log = Arc::new(InMemoryTransactionLog::new());
        let larder = Larder::new(
            Arc::new(InMemoryInventoryStore::new()),
            Arc::new(InMemoryRecipeStore::new()),
            log.clone(),
        );
        (larder, log)
    }

    #[test]
    fn adding_twice_sums_quantities() {
        let larder = Larder::in_memory();
        larder.add_inventory_item("cheese", 100.0, "g", Some("Dairy"), Some(20.0)).unwrap();
        let item = larder.add_inventory_item("cheese", 50.0, "g", None, None).unwrap();
        assert_eq!(item.quantity, 150.0);
    }

    #[test]
    fn add_and_restock_journal_one_transaction_each() {
        let (larder, log) = service_with_log();
        larder.add_inventory_item("cheese", 100.0, "g", Some("Dairy"), Some(20.0)).unwrap();
        larder.add_inventory_item("cheese", 50.0, "g", None, None).unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "Initial stock");
        assert_eq!(entries[0].signed_delta(), 100.0);
        assert_eq!(entries[1].description, "Restock");
        assert_eq!(entries[1].signed_delta(), 50.0);
        assert!(entries.iter().all(|tx| tx.item_name == "cheese"));
        log.validate_chain().unwrap();
    }

    #[test]
    fn quantity_patch_journals_a_signed_adjustment() {
        let (larder, log) = service_with_log();
        let item = larder.add_inventory_item("flour", 2000.0, "g", Some("Baking"), Some(500.0)).unwrap();

        larder
            .update_inventory_item(item.id, &ItemPatch::new().quantity(1500.0))
            .unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, TxAction::Subtract);
        assert_eq!(entries[1].quantity, 500.0);
        assert_eq!(entries[1].description, "Manual adjustment");
    }

    #[test]
    fn non_quantity_patch_does_not_touch_the_ledger() {
        let (larder, log) = service_with_log();
        let item = larder.add_inventory_item("flour", 2000.0, "g", None, None).unwrap();

        let updated = larder
            .update_inventory_item(item.id, &ItemPatch::new().category("Baking"))
            .unwrap();
        assert!(updated.changed);
        assert_eq!(log.len().unwrap(), 1); // only the initial stock entry
    }

    #[test]
    fn no_op_patch_reports_unchanged_not_missing() {
        let larder = Larder::in_memory();
        let item = larder.add_inventory_item("flour", 2000.0, "g", None, None).unwrap();
        let updated = larder
            .update_inventory_item(item.id, &ItemPatch::new().quantity(2000.0))
            .unwrap();
        assert!(!updated.changed);
    }

    #[test]
    fn insufficient_preparation_fails_and_preserves_stock() {
        let larder = Larder::in_memory();
        larder.add_inventory_item("cheese", 100.0, "g", Some("Dairy"), Some(20.0)).unwrap();
        let recipe = larder
            .add_recipe(
                "Cheese Wheel",
                vec![Ingredient::new("cheese", 150.0, "g")],
                None,
                None,
            )
            .unwrap();

        let err = larder.prepare_recipe(recipe.id).unwrap_err();
        let EngineError::InsufficientStock { shortfalls } = err else {
            panic!("expected InsufficientStock");
        };
        assert_eq!(shortfalls[0].required, 150.0);
        assert_eq!(shortfalls[0].available, 100.0);

        let cheese = larder
            .list_inventory()
            .unwrap()
            .into_iter()
            .find(|item| item.name == "cheese")
            .unwrap();
        assert_eq!(cheese.quantity, 100.0);
    }

    #[test]
    fn two_burgers_clamp_cheese_at_zero() {
        let larder = Larder::in_memory();
        larder.add_inventory_item("cheese", 30.0, "g", Some("Dairy"), Some(20.0)).unwrap();

        let report = larder.consume_detected(&[DishCount::new("burger", 2)]).unwrap();
        let cheese = report
            .updates
            .iter()
            .find(|delta| delta.name == "cheese")
            .unwrap();
        assert_eq!(cheese.previous_quantity, 30.0);
        assert_eq!(cheese.used_quantity, 40.0);
        assert_eq!(cheese.new_quantity, 0.0);
    }

    #[test]
    fn detection_consumption_never_goes_negative() {
        let larder = Larder::in_memory();
        let report = larder.consume_detected(&[DishCount::new("pizza", 3)]).unwrap();
        assert!(report.updates.iter().all(|delta| delta.new_quantity >= 0.0));
    }

    #[test]
    fn unknown_dishes_are_a_validation_error() {
        let larder = Larder::in_memory();
        let err = larder.consume_detected(&[DishCount::new("sushi", 1)]).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn recipe_insert_is_idempotent_across_the_facade() {
        let larder = Larder::in_memory();
        let first = larder
            .add_recipe(
                "Classic Burger",
                vec![Ingredient::new("beef patty", 1.0, "piece")],
                None,
                Some("Burger"),
            )
            .unwrap();
        let second = larder
            .add_recipe(
                "Classic Burger",
                vec![Ingredient::new("tofu", 1.0, "piece")],
                None,
                Some("Burger"),
            )
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.ingredients[0].name, "beef patty");
    }

    #[test]
    fn low_stock_excludes_threshold_equality() {
        let larder = Larder::in_memory();
        larder.add_inventory_item("low", 5.0, "g", None, Some(10.0)).unwrap();
        larder.add_inventory_item("exact", 10.0, "g", None, Some(10.0)).unwrap();
        larder.add_inventory_item("high", 20.0, "g", None, Some(10.0)).unwrap();

        let low: Vec<_> = larder
            .list_low_stock()
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(low, vec!["low"]);
    }

    #[test]
    fn every_quantity_mutation_appends_exactly_one_transaction() {
        let (larder, log) = service_with_log();

        let item = larder.add_inventory_item("bread", 100.0, "slice", None, None).unwrap(); // 1
        larder.add_inventory_item("ham", 1000.0, "g", None, None).unwrap(); // 2
        larder.add_inventory_item("bread", 10.0, "slice", None, None).unwrap(); // 3 (restock)
        larder
            .update_inventory_item(item.id, &ItemPatch::new().quantity(90.0))
            .unwrap(); // 4 (manual adjustment)

        let recipe = larder
            .add_recipe(
                "Ham Sandwich",
                vec![
                    Ingredient::new("bread", 2.0, "slice"),
                    Ingredient::new("ham", 30.0, "g"),
                ],
                None,
                None,
            )
            .unwrap();
        larder.prepare_recipe(recipe.id).unwrap(); // 5, 6

        let batch = DetectionBatch {
            detected_dishes: vec![DishCount::new("sandwich", 1)],
            ingredients_needed: vec![Ingredient::new("ham", 30.0, "g")],
        };
        larder.consume_from_detection_batch(&batch).unwrap(); // 7

        assert_eq!(log.len().unwrap(), 7);
        log.validate_chain().unwrap();

        let bread = log.read_for_item("bread").unwrap();
        let net: f64 = bread.iter().map(|tx| tx.signed_delta()).sum();
        // 100 + 10 - 20 (adjustment) - 2 (sandwich) = 88
        assert_eq!(net, 88.0);
    }

    #[test]
    fn prepared_recipe_transactions_reference_the_recipe_name() {
        let (larder, log) = service_with_log();
        larder.add_inventory_item("potatoes", 5000.0, "g", None, None).unwrap();
        let recipe = larder
            .add_recipe(
                "French Fries",
                vec![Ingredient::new("potatoes", 150.0, "g")],
                None,
                Some("Side"),
            )
            .unwrap();

        larder.prepare_recipe(recipe.id).unwrap();
        let last = log.read_all().unwrap().pop().unwrap();
        assert_eq!(last.description, "Used in recipe: French Fries");
        assert_eq!(last.item_name, "potatoes");
    }
}
