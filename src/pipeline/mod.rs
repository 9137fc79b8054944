//! Pipeline module - bucket engine and dataset plumbing

pub mod bucket;
pub mod discretize;
pub mod error;
pub mod interval;
pub mod loader;
pub mod sequence;

pub use bucket::*;
pub use discretize::*;
pub use error::*;
pub use interval::*;
pub use loader::*;
pub use sequence::*;
