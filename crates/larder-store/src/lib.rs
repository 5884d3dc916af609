//! Store boundaries for the Larder inventory consumption engine.
//!
//! This crate provides:
//! - [`InventoryStore`] / [`RecipeStore`] trait boundaries
//! - Explicit, validated field patches ([`ItemPatch`], [`RecipePatch`])
//! - [`InMemoryInventoryStore`] / [`InMemoryRecipeStore`] for tests and embedding
//!
//! Both stores enforce name uniqueness and keep every read-modify-write
//! atomic at the call level. The inventory store additionally offers
//! [`InventoryStore::deduct_all`], a check-then-commit primitive executed
//! under a single write guard so multi-item deductions are all-or-nothing.

pub mod error;
pub mod memory;
pub mod patch;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryInventoryStore, InMemoryRecipeStore};
pub use patch::{ItemPatch, RecipePatch};
pub use traits::{
    ClampedConsumption, DeductOutcome, InsertedRecipe, InventoryStore, RecipeStore, Updated,
    UpdatedRecipe, Upserted,
};
