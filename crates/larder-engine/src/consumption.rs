use serde::{Deserialize, Serialize};
use tracing::info;

use larder_ledger::{TransactionInput, TransactionLog, TxAction};
use larder_store::InventoryStore;
use larder_types::{summarize_dishes, DetectionBatch, DishCount, StockDelta};

use crate::error::{EngineError, EngineResult};

/// Outcome of applying one detection batch to the inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReport {
    pub detected_dishes: Vec<DishCount>,
    pub updates: Vec<StockDelta>,
}

/// Apply a detection batch: subtract each demanded ingredient with
/// clamp-at-zero semantics and journal every change.
///
/// Consumption is best-effort tracking, not a gate: it never rejects on
/// insufficiency, and per-ingredient updates are applied independently.
/// A batch without a demand list is the caller's error.
pub(crate) fn consume_batch(
    inventory: &dyn InventoryStore,
    log: &dyn TransactionLog,
    batch: &DetectionBatch,
) -> EngineResult<ConsumptionReport> {
    if batch.ingredients_needed.is_empty() {
        return Err(EngineError::Validation(
            "detection batch carries no ingredient demand".into(),
        ));
    }

    let dish_summary = summarize_dishes(&batch.detected_dishes);
    let mut updates = Vec::with_capacity(batch.ingredients_needed.len());

    for demand in &batch.ingredients_needed {
        let consumed = inventory.consume_clamped(&demand.name, demand.quantity, &demand.unit)?;

        if consumed.created {
            // Placeholder items enter the ledger like any other creation.
            log.append(TransactionInput::new(
                TxAction::Add,
                &demand.name,
                0.0,
                &demand.unit,
                "Initial stock",
            ))?;
        }
        log.append(TransactionInput::new(
            TxAction::Subtract,
            &demand.name,
            demand.quantity,
            &demand.unit,
            format!("Used in detected dishes: {dish_summary}"),
        ))?;

        updates.push(consumed.delta);
    }

    info!(
        dishes = %dish_summary,
        ingredients = updates.len(),
        "detection batch consumed"
    );
    Ok(ConsumptionReport {
        detected_dishes: batch.detected_dishes.clone(),
        updates,
    })
}
