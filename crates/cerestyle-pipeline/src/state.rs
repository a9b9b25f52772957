//! Observable pipeline state
//!
//! One [`PipelineState`] exists per coordinator. The presentation layer only
//! reads it; every mutation goes through the coordinator.

use cerestyle_core::models::{
    AnalysisResult, ColorCode, OutfitItem, Palette, PaletteResolver, Photo, Season,
};
use cerestyle_core::{ErrorMetadata, StyleError};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Main state machine phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    /// Gender gate is open; nothing runs until the user picks
    AwaitingGenderChoice,
    Analyzing,
    Ready,
    Error,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::AwaitingGenderChoice => write!(f, "awaiting gender choice"),
            Phase::Analyzing => write!(f, "analyzing"),
            Phase::Ready => write!(f, "ready"),
            Phase::Error => write!(f, "error"),
        }
    }
}

/// Color-detail sub-state, independent of [`Phase`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "color", rename_all = "snake_case")]
pub enum ColorDetail {
    #[default]
    Hidden,
    Showing(ColorCode),
}

/// Which step produced the current error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    Analysis,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineFailure {
    pub source: ErrorSource,
    pub code: &'static str,
    pub message: String,
}

impl PipelineFailure {
    pub(crate) fn new(source: ErrorSource, err: &StyleError) -> Self {
        Self {
            source,
            code: err.error_code(),
            message: err.client_message(),
        }
    }
}

/// User-gate view of the state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub pending_gender_choice: bool,
    pub pending_color_detail: Option<ColorCode>,
}

/// Palette swatch with its meaning, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub color: ColorCode,
    pub meaning: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineState {
    pub phase: Phase,
    /// True from entering `Analyzing` until analysis and search both settle
    pub loading: bool,
    /// Bumped on every submission and every gender choice
    pub generation: u64,
    pub status_message: Option<String>,
    pub error: Option<PipelineFailure>,
    pub skin_tone: Option<ColorCode>,
    pub season: Option<Season>,
    pub palette: Palette,
    pub outfits: Vec<OutfitItem>,
    pub color_detail: ColorDetail,
    pub selected_file: Option<String>,
    #[serde(skip)]
    pub(crate) photo: Option<Photo>,
}

impl PipelineState {
    pub fn selection(&self) -> SelectionState {
        SelectionState {
            pending_gender_choice: self.phase == Phase::AwaitingGenderChoice,
            pending_color_detail: match &self.color_detail {
                ColorDetail::Hidden => None,
                ColorDetail::Showing(color) => Some(color.clone()),
            },
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn swatches(&self) -> Vec<Swatch> {
        self.palette
            .iter()
            .map(|color| Swatch {
                color: color.clone(),
                meaning: PaletteResolver::meaning(color),
            })
            .collect()
    }

    pub(crate) fn select_photo(&mut self, photo: Photo) {
        self.selected_file = Some(photo.file_name().to_string());
        self.photo = Some(photo);
    }

    /// Enter `Analyzing` for a new generation, clearing every earlier result.
    pub(crate) fn begin_run(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Analyzing;
        self.loading = true;
        self.status_message = None;
        self.error = None;
        self.skin_tone = None;
        self.season = None;
        self.palette = Palette::default();
        self.outfits = Vec::new();
        self.color_detail = ColorDetail::Hidden;
        self.generation
    }

    pub(crate) fn apply_analysis(&mut self, result: AnalysisResult) {
        self.status_message = Some(result.status_message);
        self.skin_tone = Some(result.skin_tone);
        self.season = result.season;
        self.palette = result.palette;
    }

    pub(crate) fn apply_outfits(&mut self, outfits: Vec<OutfitItem>) {
        self.outfits = outfits;
    }

    pub(crate) fn finish(&mut self) {
        self.phase = Phase::Ready;
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, source: ErrorSource, err: &StyleError) {
        self.phase = Phase::Error;
        self.loading = false;
        self.error = Some(PipelineFailure::new(source, err));
    }

    /// Back to the open gate after an abandoned run
    pub(crate) fn cancel_run(&mut self) {
        self.phase = Phase::AwaitingGenderChoice;
        self.loading = false;
    }
}
