//! Inspection Sync - weighted checklist scoring and offline synchronization
//! for property inspections.
//!
//! Inspectors judge weighted criteria zone by zone while offline. Each edit is
//! scored, snapshotted per zone and kept in a local pending queue; a sync
//! round submits the whole queue in one request, writes back what the server
//! confirmed and purges every inspection whose local lifecycle is over.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
