//! CereStyle Core Library
//!
//! This crate provides the domain models, color extraction, palette lookup,
//! error types, configuration and service traits shared by the CereStyle
//! client, pipeline and CLI crates.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;

// Re-export commonly used types
pub use config::StyleConfig;
pub use error::{ErrorMetadata, LogLevel, StyleError};
pub use hooks::{AnalysisService, OutfitSearchService};
pub use models::{
    extract_colors, extract_season, AnalysisResult, ColorCode, Gender, OutfitItem, Palette,
    PaletteResolver, Photo, Season, UploadRequest,
};
