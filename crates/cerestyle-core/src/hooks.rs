//! Service traits for the external collaborators
//!
//! The pipeline coordinator only talks to the analysis and image-search
//! services through these traits. `cerestyle-api-client` provides the HTTP
//! implementations; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::StyleError;
use crate::models::{AnalysisResult, ColorCode, Gender, OutfitItem, UploadRequest};

/// Skin-tone analysis service
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Submit the photo and gender once. The request is consumed.
    ///
    /// Fails with `AnalysisProtocol` when the response lacks required fields and
    /// `AnalysisTransport` on network or server failure.
    async fn analyze(&self, request: UploadRequest) -> Result<AnalysisResult, StyleError>;
}

/// Outfit image search service
#[async_trait]
pub trait OutfitSearchService: Send + Sync {
    /// Fails with `SearchTransport` on network or server failure.
    async fn search_outfits(
        &self,
        color: &ColorCode,
        gender: Gender,
    ) -> Result<Vec<OutfitItem>, StyleError>;
}
