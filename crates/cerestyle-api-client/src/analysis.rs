//! Skin-tone analysis client (`POST /upload`)

use async_trait::async_trait;
use cerestyle_core::models::{AnalysisResponse, AnalysisResult, UploadRequest};
use cerestyle_core::{AnalysisService, StyleConfig, StyleError};
use reqwest::multipart::{Form, Part};

use crate::{Auth, HttpClient, HttpError};

/// Submits photos to the analysis service and validates its answer
#[derive(Clone, Debug)]
pub struct RecommendationClient {
    http: HttpClient,
    upload_url: String,
}

impl RecommendationClient {
    pub fn new(config: &StyleConfig) -> Result<Self, StyleError> {
        let http = HttpClient::new(config.http_timeout(), Auth::None)
            .map_err(|e| StyleError::Config(e.to_string()))?;

        Ok(Self {
            http,
            upload_url: config.upload_url(),
        })
    }

    fn build_form(request: UploadRequest) -> Form {
        let UploadRequest { photo, gender } = request;
        let file_name = photo.file_name().to_string();

        Form::new()
            .part("file", Part::stream(photo.bytes().clone()).file_name(file_name))
            .text("gender", gender.as_str())
    }
}

#[async_trait]
impl AnalysisService for RecommendationClient {
    async fn analyze(&self, request: UploadRequest) -> Result<AnalysisResult, StyleError> {
        debug_assert!(!request.photo.is_empty(), "Photo::new rejects empty payloads");

        let gender = request.gender;
        let photo_bytes = request.photo.len();

        tracing::debug!(
            url = %self.upload_url,
            gender = %gender,
            photo_bytes,
            "Submitting photo for skin-tone analysis"
        );

        let form = Self::build_form(request);
        let response: AnalysisResponse = self
            .http
            .post_multipart(&self.upload_url, form)
            .await
            .map_err(|e| match e {
                HttpError::Decode(detail) => StyleError::AnalysisProtocol(detail),
                other => StyleError::AnalysisTransport(other.to_string()),
            })?;

        let result = AnalysisResult::try_from(response)?;

        tracing::info!(
            skin_tone = %result.skin_tone,
            palette_size = result.palette.len(),
            season = ?result.season,
            "Skin-tone analysis completed"
        );

        Ok(result)
    }
}
