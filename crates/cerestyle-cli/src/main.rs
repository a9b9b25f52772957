//! CereStyle CLI: runs the style recommendation flow from the terminal.
//!
//! Set CERESTYLE_SEARCH_API_KEY (or PEXELS_API_KEY); CERESTYLE_ANALYSIS_URL and
//! CERESTYLE_SEARCH_URL override the default endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use cerestyle_api_client::{OutfitSearchClient, RecommendationClient};
use cerestyle_cli::{describe_palette, init_tracing, print_json, RecommendationReport};
use cerestyle_core::models::{
    extract_colors, extract_season, ColorCode, Gender, PaletteResolver, Photo,
};
use cerestyle_core::{ErrorMetadata, StyleConfig};
use cerestyle_pipeline::{PipelineCoordinator, RunOutcome};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "cerestyle",
    about = "Personal color palette and outfit suggestions from a photo"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a photo and fetch outfit suggestions
    Recommend {
        /// Path to the photo to analyze
        photo: PathBuf,
        /// Style category: male or female
        #[arg(long)]
        gender: Gender,
    },
    /// Extract color codes from recommendation text
    Colors {
        /// Free text containing #RRGGBB codes
        text: String,
    },
    /// Show the meaning of a color code
    Meaning {
        /// Color code, e.g. #FF5733
        color: ColorCode,
    },
}

#[derive(Serialize)]
struct ColorsOutput {
    season: Option<cerestyle_core::Season>,
    colors: Vec<cerestyle_pipeline::Swatch>,
}

#[derive(Serialize)]
struct MeaningOutput {
    color: ColorCode,
    meaning: &'static str,
    known: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { photo, gender } => recommend(photo, gender).await?,
        Commands::Colors { text } => {
            print_json(&ColorsOutput {
                season: extract_season(&text),
                colors: describe_palette(&extract_colors(&text)),
            })?;
        }
        Commands::Meaning { color } => {
            print_json(&MeaningOutput {
                meaning: PaletteResolver::insight(&color),
                known: PaletteResolver::lookup(&color).is_some(),
                color,
            })?;
        }
    }

    Ok(())
}

async fn recommend(path: PathBuf, gender: Gender) -> anyhow::Result<()> {
    let config = StyleConfig::from_env().context(
        "Failed to load configuration. Set CERESTYLE_SEARCH_API_KEY (or PEXELS_API_KEY)",
    )?;

    let analysis = RecommendationClient::new(&config)?;
    let search = OutfitSearchClient::new(&config)?;
    let coordinator = PipelineCoordinator::new(Arc::new(analysis), Arc::new(search));

    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read photo: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo.jpg")
        .to_string();

    tracing::info!(photo = %path.display(), gender = %gender, "Running recommendation");
    coordinator.select_file(Photo::new(bytes, file_name)?);
    coordinator.submit()?;
    let outcome = coordinator.choose_gender(gender).await?;

    print_json(&RecommendationReport::from(coordinator.state()))?;

    match outcome {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Failed(err) => {
            let message = err.client_message();
            Err(anyhow::Error::new(err).context(message))
        }
        RunOutcome::Superseded => Err(anyhow::anyhow!("Run was superseded")),
    }
}
