//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, scores, errors)
//! - `scoring` - Pure score computation at element, zone and inspection level
//! - `catalog` - Weighted catalog and the zone loader built on it
//! - `inspection` - Checklist data shapes and the inspection aggregate
//! - `sync` - Batch wire format, sync outcomes and the purge policy

pub mod catalog;
pub mod foundation;
pub mod inspection;
pub mod scoring;
pub mod sync;
