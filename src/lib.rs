//! LUCS-DN: Supervised Discretisation Library
//!
//! Splits numeric features into a small number of contiguous intervals,
//! each labelled with the class value that dominates it.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
