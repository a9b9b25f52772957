//! Pipeline coordinator
//!
//! Sequences the gated flow `Idle -> AwaitingGenderChoice -> Analyzing -> Ready`
//! (or `Error`). Each analysis run is tagged with the generation it started
//! in; a run whose generation has been superseded by a newer submission
//! drops its results instead of writing them.

use std::sync::Arc;

use cerestyle_core::error::NO_FILE_MESSAGE;
use cerestyle_core::models::{Gender, PaletteResolver, Photo, UploadRequest};
use cerestyle_core::{
    AnalysisService, ColorCode, ErrorMetadata, LogLevel, OutfitSearchService, StyleError,
};
use tokio::sync::watch;

use crate::state::{ColorDetail, ErrorSource, Phase, PipelineState};

/// How a single gender-gated run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Results applied; the pipeline is `Ready`
    Completed,
    /// The failure was recorded in the pipeline state
    Failed(StyleError),
    /// A newer submission started while this run was in flight; nothing was applied
    Superseded,
}

/// Owns the pipeline state and drives both external services.
///
/// Share it behind an `Arc`; all operations take `&self`.
pub struct PipelineCoordinator {
    analysis: Arc<dyn AnalysisService>,
    search: Arc<dyn OutfitSearchService>,
    state: watch::Sender<PipelineState>,
}

impl PipelineCoordinator {
    pub fn new(analysis: Arc<dyn AnalysisService>, search: Arc<dyn OutfitSearchService>) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            analysis,
            search,
            state,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Change notifications for the presentation layer
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// Remember the photo for the next submission. Replaces any earlier selection.
    pub fn select_file(&self, photo: Photo) {
        tracing::debug!(file = %photo.file_name(), bytes = photo.len(), "Photo selected");
        self.state.send_modify(|state| state.select_photo(photo));
    }

    /// Open the gender gate.
    ///
    /// Without a selected photo the submission is rejected and the phase is
    /// left untouched. Submitting supersedes any run still in flight.
    pub fn submit(&self) -> Result<(), StyleError> {
        let mut outcome = Ok(());

        self.state.send_if_modified(|state| {
            if state.photo.is_none() {
                state.status_message = Some(NO_FILE_MESSAGE.to_string());
                outcome = Err(StyleError::NoFileSelected);
                return true;
            }

            if state.phase == Phase::AwaitingGenderChoice {
                return false;
            }

            if state.phase == Phase::Analyzing {
                tracing::info!(
                    generation = state.generation,
                    "New submission supersedes in-flight analysis"
                );
            }

            state.generation += 1;
            state.phase = Phase::AwaitingGenderChoice;
            state.loading = false;
            true
        });

        match &outcome {
            Ok(()) => tracing::debug!("Gender gate opened"),
            Err(_) => tracing::debug!("Submission rejected: no file selected"),
        }

        outcome
    }

    /// Close the gender gate and run analysis followed by the outfit search.
    ///
    /// Only valid while the gate is open. Pipeline failures are recorded in
    /// the state and reported as [`RunOutcome::Failed`], never as `Err`.
    ///
    /// Dropping the future before it resolves abandons the run: loading is
    /// cleared and the gate reopens, so `choose_gender` can be called again.
    pub async fn choose_gender(&self, gender: Gender) -> Result<RunOutcome, StyleError> {
        let mut started: Result<(u64, Photo), StyleError> = Err(StyleError::NoFileSelected);

        self.state.send_if_modified(|state| {
            if state.phase != Phase::AwaitingGenderChoice {
                started = Err(StyleError::InvalidTransition {
                    from: state.phase.to_string(),
                    action: "choose gender",
                });
                return false;
            }

            let Some(photo) = state.photo.clone() else {
                started = Err(StyleError::NoFileSelected);
                return false;
            };

            started = Ok((state.begin_run(), photo));
            true
        });

        let (generation, photo) = started?;
        let _guard = RunGuard {
            state: &self.state,
            generation,
        };
        tracing::info!(generation, gender = %gender, "Starting recommendation run");

        let result = match self
            .analysis
            .analyze(UploadRequest::new(photo, gender))
            .await
        {
            Ok(result) => result,
            Err(err) => {
                return Ok(self.record_failure(generation, ErrorSource::Analysis, err));
            }
        };

        let primary = result.palette.primary().cloned();
        if !self.apply_if_current(generation, |state| state.apply_analysis(result)) {
            return Ok(RunOutcome::Superseded);
        }

        let Some(color) = primary else {
            tracing::info!(generation, "Palette is empty; skipping outfit search");
            return Ok(self.complete(generation));
        };

        match self.search.search_outfits(&color, gender).await {
            Ok(outfits) => {
                if !self.apply_if_current(generation, |state| state.apply_outfits(outfits)) {
                    return Ok(RunOutcome::Superseded);
                }
                Ok(self.complete(generation))
            }
            Err(err) => Ok(self.record_failure(generation, ErrorSource::Search, err)),
        }
    }

    /// Show the detail view for a palette color. Returns its insight text.
    pub fn inspect_color(&self, color: &ColorCode) -> Result<&'static str, StyleError> {
        let mut outcome = Ok(PaletteResolver::insight(color));

        self.state.send_if_modified(|state| {
            if !state.palette.contains(color) {
                outcome = Err(StyleError::InvalidInput(format!(
                    "{} is not part of the current palette",
                    color
                )));
                return false;
            }
            state.color_detail = ColorDetail::Showing(color.clone());
            true
        });

        outcome
    }

    pub fn dismiss_color_detail(&self) {
        self.state.send_if_modified(|state| {
            if state.color_detail == ColorDetail::Hidden {
                return false;
            }
            state.color_detail = ColorDetail::Hidden;
            true
        });
    }

    /// Apply `update` only if `generation` is still the latest one.
    fn apply_if_current<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut PipelineState),
    {
        let applied = self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            update(state);
            true
        });

        if !applied {
            tracing::debug!(generation, "Discarding result from superseded run");
        }
        applied
    }

    fn complete(&self, generation: u64) -> RunOutcome {
        if self.apply_if_current(generation, |state| state.finish()) {
            tracing::info!(generation, "Recommendation ready");
            RunOutcome::Completed
        } else {
            RunOutcome::Superseded
        }
    }

    fn record_failure(&self, generation: u64, source: ErrorSource, err: StyleError) -> RunOutcome {
        log_failure(generation, source, &err);
        if self.apply_if_current(generation, |state| state.fail(source, &err)) {
            RunOutcome::Failed(err)
        } else {
            RunOutcome::Superseded
        }
    }
}

/// Reopens the gate if a run is dropped while still `Analyzing`.
struct RunGuard<'a> {
    state: &'a watch::Sender<PipelineState>,
    generation: u64,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        self.state.send_if_modified(|state| {
            if state.generation != generation || state.phase != Phase::Analyzing {
                return false;
            }
            tracing::info!(generation, "Recommendation run abandoned before completion");
            state.cancel_run();
            true
        });
    }
}

fn log_failure(generation: u64, source: ErrorSource, err: &StyleError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(generation, ?source, code, error = %err, "Run failed"),
        LogLevel::Warn => tracing::warn!(generation, ?source, code, error = %err, "Run failed"),
        LogLevel::Error => tracing::error!(generation, ?source, code, error = %err, "Run failed"),
    }
}
