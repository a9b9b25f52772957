//! Data models for the recommendation flow
//!
//! Each sub-module covers one stage: color parsing and palettes, palette
//! meanings, the analysis upload, and outfit search results.

mod analysis;
mod color;
mod outfit;
mod palette;

// Re-export all models for convenient imports
pub use analysis::*;
pub use color::*;
pub use outfit::*;
pub use palette::*;
