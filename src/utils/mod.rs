//! Utilities
pub mod iter;
