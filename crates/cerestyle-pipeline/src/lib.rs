//! CereStyle recommendation pipeline.
//!
//! [`PipelineCoordinator`] sequences the gender gate, the skin-tone analysis
//! and the dependent outfit search, publishing every transition through a
//! [`PipelineState`] the presentation layer can observe.

pub mod coordinator;
pub mod state;

pub use coordinator::{PipelineCoordinator, RunOutcome};
pub use state::{
    ColorDetail, ErrorSource, Phase, PipelineFailure, PipelineState, SelectionState, Swatch,
};
