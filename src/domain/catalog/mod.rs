//! Catalog module - the weighted catalog and the zone loader built on it.

mod loader;
mod weighted_catalog;

pub use loader::{LoadedZone, ZoneCatalogLoader};
pub use weighted_catalog::{CatalogCriterion, CatalogElement, CatalogZone, WeightedCatalog};
