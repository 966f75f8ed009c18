//! Core types and the normalisation pipeline for carewatch.
//!
//! Source adapters hand this crate unordered batches of raw rows. The crate
//! maps them onto the canonical [`facility::Facility`] schema, folds them into
//! each jurisdiction's existing collection, and recomputes summaries. It is
//! deliberately free of HTTP and database dependencies; persistence is reached
//! only through the [`store::FacilityStore`] trait.

pub mod aggregate;
pub mod capacity;
pub mod county;
pub mod dedupe;
pub mod error;
pub mod facility;
pub mod memory;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod raw;
pub mod store;
pub mod tables;

pub use error::{Error, Result};
