use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use larder_ledger::{TransactionInput, TransactionLog, TxAction};
use larder_store::{DeductOutcome, InventoryStore, RecipeStore};
use larder_types::{Recipe, RecipeId, StockDelta};

use crate::error::{EngineError, EngineResult};

/// Outcome of preparing one recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreparationReport {
    pub recipe: Recipe,
    pub updates: Vec<StockDelta>,
}

/// Prepare a recipe: verify sufficiency of *all* ingredients, then commit
/// the full deduction, or reject with every shortfall and change nothing.
///
/// The check and commit run inside the store's `deduct_all` under one
/// exclusive guard, so a concurrent preparation sharing an ingredient
/// cannot slip between them and overdraw stock.
pub(crate) fn prepare(
    inventory: &dyn InventoryStore,
    recipes: &dyn RecipeStore,
    log: &dyn TransactionLog,
    id: RecipeId,
) -> EngineResult<PreparationReport> {
    let recipe = recipes
        .get_by_id(id)?
        .ok_or(EngineError::RecipeNotFound(id))?;

    let updates = match inventory.deduct_all(&recipe.ingredients)? {
        DeductOutcome::Insufficient(shortfalls) => {
            warn!(
                recipe = %recipe.name,
                shortfalls = shortfalls.len(),
                "recipe preparation rejected"
            );
            return Err(EngineError::InsufficientStock { shortfalls });
        }
        DeductOutcome::Applied(deltas) => deltas,
    };

    for delta in &updates {
        log.append(TransactionInput::new(
            TxAction::Subtract,
            &delta.name,
            delta.used_quantity,
            &delta.unit,
            format!("Used in recipe: {}", recipe.name),
        ))?;
    }

    info!(recipe = %recipe.name, ingredients = updates.len(), "recipe prepared");
    Ok(PreparationReport { recipe, updates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_ledger::InMemoryTransactionLog;
    use larder_store::{InMemoryInventoryStore, InMemoryRecipeStore};
    use larder_types::Ingredient;

    fn fixtures() -> (InMemoryInventoryStore, InMemoryRecipeStore, InMemoryTransactionLog) {
        (
            InMemoryInventoryStore::new(),
            InMemoryRecipeStore::new(),
            InMemoryTransactionLog::new(),
        )
    }

    #[test]
    fn missing_recipe_is_terminal() {
        let (inventory, recipes, log) = fixtures();
        let id = RecipeId::new();
        let err = prepare(&inventory, &recipes, &log, id).unwrap_err();
        assert_eq!(err, EngineError::RecipeNotFound(id));
    }

    #[test]
    fn insufficiency_lists_shortfall_and_changes_nothing() {
        let (inventory, recipes, log) = fixtures();
        inventory.upsert("cheese", 100.0, "g", "Dairy", 20.0).unwrap();
        let created = recipes
            .insert_if_absent(
                "Cheese Wheel",
                vec![Ingredient::new("cheese", 150.0, "g")],
                "",
                "Other",
            )
            .unwrap();

        let err = prepare(&inventory, &recipes, &log, created.recipe.id).unwrap_err();
        let EngineError::InsufficientStock { shortfalls } = err else {
            panic!("expected InsufficientStock");
        };
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].required, 150.0);
        assert_eq!(shortfalls[0].available, 100.0);

        assert_eq!(inventory.get("cheese").unwrap().unwrap().quantity, 100.0);
        assert_eq!(log.len().unwrap(), 0);
    }

    #[test]
    fn success_deducts_and_journals_each_ingredient() {
        let (inventory, recipes, log) = fixtures();
        inventory.upsert("bread", 10.0, "slice", "Bread", 4.0).unwrap();
        inventory.upsert("ham", 100.0, "g", "Meat", 20.0).unwrap();
        let created = recipes
            .insert_if_absent(
                "Ham Sandwich",
                vec![
                    Ingredient::new("bread", 2.0, "slice"),
                    Ingredient::new("ham", 30.0, "g"),
                ],
                "Assemble.",
                "Sandwich",
            )
            .unwrap();

        let report = prepare(&inventory, &recipes, &log, created.recipe.id).unwrap();
        assert_eq!(report.updates.len(), 2);
        assert_eq!(inventory.get("bread").unwrap().unwrap().quantity, 8.0);
        assert_eq!(inventory.get("ham").unwrap().unwrap().quantity, 70.0);

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|tx| tx.description == "Used in recipe: Ham Sandwich"));
        assert!(entries.iter().all(|tx| tx.action == TxAction::Subtract));
    }

    #[test]
    fn duplicate_ingredient_recipe_cannot_overdraw() {
        let (inventory, recipes, log) = fixtures();
        inventory.upsert("cheese", 100.0, "g", "Dairy", 20.0).unwrap();
        let created = recipes
            .insert_if_absent(
                "Double Cheese Melt",
                vec![
                    Ingredient::new("cheese", 60.0, "g"),
                    Ingredient::new("cheese", 60.0, "g"),
                ],
                "",
                "Other",
            )
            .unwrap();

        let err = prepare(&inventory, &recipes, &log, created.recipe.id).unwrap_err();
        let EngineError::InsufficientStock { shortfalls } = err else {
            panic!("expected InsufficientStock");
        };
        assert_eq!(shortfalls[0].required, 120.0);
        assert_eq!(inventory.get("cheese").unwrap().unwrap().quantity, 100.0);
        assert_eq!(log.len().unwrap(), 0);
    }

    #[test]
    fn empty_recipe_prepares_with_no_updates() {
        let (inventory, recipes, log) = fixtures();
        let created = recipes
            .insert_if_absent("Glass of Water", vec![], "Pour.", "Drink")
            .unwrap();
        let report = prepare(&inventory, &recipes, &log, created.recipe.id).unwrap();
        assert!(report.updates.is_empty());
        assert_eq!(log.len().unwrap(), 0);
    }
}
