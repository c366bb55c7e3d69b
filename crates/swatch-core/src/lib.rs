//! Core types and utilities for the swatch design-token pipeline.
//!
//! This crate provides the foundational types used across all other swatch crates:
//! - Token trees for palette and theme mapping documents
//! - Value types (token paths, hex literals)
//! - The palette lookup table
//! - Error types

pub mod errors;
pub mod palette;
pub mod tree;
pub mod types;

pub use errors::*;
pub use palette::*;
pub use tree::*;
pub use types::*;
