//! # Support Utilities

pub mod lines;
pub mod ranges;
