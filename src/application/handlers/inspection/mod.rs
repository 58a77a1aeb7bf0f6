//! Inspection command handlers.

mod sign_inspection;
mod start_inspection;

pub use sign_inspection::{SignInspectionCommand, SignInspectionHandler};
pub use start_inspection::{StartInspectionCommand, StartInspectionHandler};
