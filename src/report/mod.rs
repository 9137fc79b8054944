//! Report module - summarizing discretisation results

pub mod division_export;
pub mod summary;

pub use division_export::*;
pub use summary::*;
