use larder_types::{Ingredient, ItemId, Recipe, RecipeId, Shortfall, StockDelta, StockItem};

use crate::error::StoreResult;
use crate::patch::{ItemPatch, RecipePatch};

/// Result of [`InventoryStore::upsert`].
#[derive(Clone, Debug, PartialEq)]
pub struct Upserted {
    pub item: StockItem,
    /// `true` when a new record was created, `false` when an existing
    /// record's quantity was incremented.
    pub created: bool,
}

/// Result of [`InventoryStore::update`] / [`RecipeStore::update`].
#[derive(Clone, Debug, PartialEq)]
pub struct Updated {
    pub item: StockItem,
    /// Quantity before the patch was applied, captured under the same
    /// guard. Callers use it to journal the signed delta.
    pub previous_quantity: f64,
    /// `true` when at least one stored value changed. A successful update
    /// of a resolvable record with equal values returns `false` instead of
    /// masquerading as NotFound.
    pub changed: bool,
}

/// Result of [`InventoryStore::consume_clamped`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClampedConsumption {
    pub delta: StockDelta,
    /// `true` when a zero-quantity placeholder was created for a
    /// previously unknown ingredient name.
    pub created: bool,
}

/// Result of [`InventoryStore::deduct_all`]: either every demand was
/// applied, or nothing was and the full shortfall list is reported.
#[derive(Clone, Debug, PartialEq)]
pub enum DeductOutcome {
    Applied(Vec<StockDelta>),
    Insufficient(Vec<Shortfall>),
}

/// Result of [`RecipeStore::insert_if_absent`].
#[derive(Clone, Debug, PartialEq)]
pub struct InsertedRecipe {
    pub recipe: Recipe,
    /// `false` when the name already existed and the stored recipe was
    /// returned unchanged.
    pub created: bool,
}

/// Result of [`RecipeStore::update`].
#[derive(Clone, Debug, PartialEq)]
pub struct UpdatedRecipe {
    pub recipe: Recipe,
    pub changed: bool,
}

/// Durable mapping from item name to stock record.
///
/// All implementations must satisfy these invariants:
/// - Exactly one record per distinct name (case-sensitive, no normalization).
/// - Every operation is atomic at the call level: a read-modify-write on
///   one item never interleaves with another mutation on the same item.
/// - [`deduct_all`](Self::deduct_all) is additionally atomic across all
///   named items: no other mutation can run between its sufficiency check
///   and its commit, and the commit is all-or-nothing.
/// - Stored quantities are never negative. Inputs are either rejected
///   (`upsert`, `update`, `deduct_all`) or clamped (`consume_clamped`).
/// - Backing failures are propagated as `StoreError::Unavailable`, never
///   silently ignored.
pub trait InventoryStore: Send + Sync {
    /// All items, sorted by name.
    fn list(&self) -> StoreResult<Vec<StockItem>>;

    /// Look up an item by name. Returns `Ok(None)` if absent.
    fn get(&self, name: &str) -> StoreResult<Option<StockItem>>;

    /// Look up an item by id. Returns `Ok(None)` if the id does not
    /// resolve; malformed id syntax is a parse failure upstream, never a
    /// store concern.
    fn get_by_id(&self, id: ItemId) -> StoreResult<Option<StockItem>>;

    /// Add stock under `name`. An existing record has `delta_quantity`
    /// added to its current quantity (an increment, not a replace); an
    /// absent name creates a record with `quantity = delta_quantity`.
    /// Rejects negative quantities and empty names.
    fn upsert(
        &self,
        name: &str,
        delta_quantity: f64,
        unit: &str,
        category: &str,
        threshold: f64,
    ) -> StoreResult<Upserted>;

    /// Apply a validated patch to the item with `id`.
    ///
    /// Returns `StoreError::ItemNotFound` when the id does not resolve;
    /// a resolvable record whose values all match the patch succeeds with
    /// `changed: false`.
    fn update(&self, id: ItemId, patch: &ItemPatch) -> StoreResult<Updated>;

    /// Delete the item with `id`. Returns `true` if a record existed.
    fn delete(&self, id: ItemId) -> StoreResult<bool>;

    /// Subtract `demand` from the item named `name`, clamping at zero.
    ///
    /// An unknown name first gets a zero-quantity placeholder record so it
    /// becomes trackable. Never fails on insufficiency: the resulting
    /// quantity is `max(0, current - demand)`.
    fn consume_clamped(&self, name: &str, demand: f64, unit: &str)
        -> StoreResult<ClampedConsumption>;

    /// Check-then-commit deduction across all `demands`.
    ///
    /// Demands sharing a name are summed before the check, so a duplicate
    /// entry cannot pass two independent checks against the same stock.
    /// Any absent item or `current < required` is recorded as a shortfall.
    /// A non-empty shortfall set aborts with
    /// [`DeductOutcome::Insufficient`] and no visible state change.
    /// Otherwise every demand is subtracted and the per-name deltas
    /// returned. Check and commit run under one exclusive guard.
    fn deduct_all(&self, demands: &[Ingredient]) -> StoreResult<DeductOutcome>;

    /// Items with `quantity < threshold`, sorted by name. Equality is not
    /// low stock.
    fn list_below_threshold(&self) -> StoreResult<Vec<StockItem>>;
}

/// Durable mapping from recipe name to its ingredient list.
///
/// Implementations enforce one recipe per distinct name and keep inserts
/// idempotent: re-inserting an existing name returns the stored recipe
/// unchanged and silently ignores the new ingredient list.
pub trait RecipeStore: Send + Sync {
    /// All recipes, sorted by name.
    fn list(&self) -> StoreResult<Vec<Recipe>>;

    /// Look up a recipe by id. Returns `Ok(None)` if the id does not resolve.
    fn get_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>>;

    /// Insert a recipe unless the name already exists (idempotent, not an
    /// update). Rejects empty names and negative ingredient quantities.
    fn insert_if_absent(
        &self,
        name: &str,
        ingredients: Vec<Ingredient>,
        instructions: &str,
        category: &str,
    ) -> StoreResult<InsertedRecipe>;

    /// Apply a validated patch to the recipe with `id`. Same
    /// NotFound / no-change separation as [`InventoryStore::update`].
    fn update(&self, id: RecipeId, patch: &RecipePatch) -> StoreResult<UpdatedRecipe>;

    /// Delete the recipe with `id`. Returns `true` if a record existed.
    fn delete(&self, id: RecipeId) -> StoreResult<bool>;
}
