//! Foundation types for the Larder inventory consumption engine.
//!
//! This crate provides the entity and report types used throughout the
//! Larder system. Every other Larder crate depends on `larder-types`.
//!
//! # Key Types
//!
//! - [`StockItem`] — a named, quantified inventory record with a low-stock threshold
//! - [`Recipe`] — a named, ordered list of ingredient demands plus instructions
//! - [`Ingredient`] — one `{name, quantity, unit}` demand referencing a stock item
//! - [`DetectionBatch`] — dish counts plus pre-aggregated ingredient demand
//! - [`StockDelta`] / [`Shortfall`] — per-ingredient mutation and insufficiency reports
//! - [`ItemId`] / [`RecipeId`] — UUID v7 entity identifiers

pub mod detection;
pub mod error;
pub mod ids;
pub mod item;
pub mod recipe;

pub use detection::{summarize_dishes, DetectionBatch, DishCount, Shortfall, StockDelta};
pub use error::TypeError;
pub use ids::{ItemId, RecipeId};
pub use item::{StockItem, DEFAULT_CATEGORY, DEFAULT_THRESHOLD};
pub use recipe::{Ingredient, Recipe};
