//! Weighted catalog - the read-only zone/element/criterion tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{CriterionId, DomainError, ElementId, ZoneId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCriterion {
    pub name: String,
    pub coef: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogElement {
    pub name: String,
    pub coef: u32,
    #[serde(default)]
    pub criteria: BTreeMap<CriterionId, CatalogCriterion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogZone {
    pub name: String,
    #[serde(default)]
    pub coef: u32,
    #[serde(default)]
    pub elements: BTreeMap<ElementId, CatalogElement>,
}

/// Externally supplied scoring catalog. Never mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedCatalog {
    zones: BTreeMap<ZoneId, CatalogZone>,
}

impl WeightedCatalog {
    pub fn new(zones: BTreeMap<ZoneId, CatalogZone>) -> Self {
        Self { zones }
    }

    /// Parses a catalog from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_input(format!("catalog is not valid JSON: {}", e)))
    }

    /// Parses a catalog from its YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DomainError::invalid_input(format!("catalog is not valid YAML: {}", e)))
    }

    pub fn zone(&self, zone_id: &ZoneId) -> Option<&CatalogZone> {
        self.zones.get(zone_id)
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &ZoneId> {
        self.zones.keys()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
