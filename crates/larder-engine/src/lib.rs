//! The Larder inventory consumption engine.
//!
//! This crate ties the stores and the transaction log together:
//! - [`DishCatalog`] — static dish-to-ingredient mapping with
//!   scale-and-combine aggregation of detected dish counts
//! - Consumption of detection batches with clamp-at-zero semantics
//!   (best-effort tracking, never rejects on insufficiency)
//! - Recipe preparation with an all-or-nothing sufficiency gate
//! - [`Larder`] — the service facade exposed to the routing layer,
//!   holding explicit store and log handles
//!
//! Every quantity mutation routed through this crate appends exactly one
//! transaction record to the log.

pub mod catalog;
pub mod consumption;
pub mod error;
pub mod preparation;
pub mod service;

pub use catalog::DishCatalog;
pub use consumption::ConsumptionReport;
pub use error::{EngineError, EngineResult};
pub use preparation::PreparationReport;
pub use service::Larder;
