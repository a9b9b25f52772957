use anyhow::Context;
use cerestyle_core::models::{Palette, PaletteResolver};
use cerestyle_pipeline::{PipelineState, Swatch};
use serde::Serialize;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// What `recommend` prints: the final state plus swatch meanings.
#[derive(Debug, Serialize)]
pub struct RecommendationReport {
    #[serde(flatten)]
    pub state: PipelineState,
    pub swatches: Vec<Swatch>,
}

impl From<PipelineState> for RecommendationReport {
    fn from(state: PipelineState) -> Self {
        let swatches = state.swatches();
        Self { state, swatches }
    }
}

/// `colors` output: each extracted code with its meaning
pub fn describe_palette(palette: &Palette) -> Vec<Swatch> {
    palette
        .iter()
        .map(|color| Swatch {
            color: color.clone(),
            meaning: PaletteResolver::meaning(color),
        })
        .collect()
}
