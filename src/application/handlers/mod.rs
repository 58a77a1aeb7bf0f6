//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod inspection;

pub use inspection::{
    SignInspectionCommand, SignInspectionHandler, StartInspectionCommand, StartInspectionHandler,
};
