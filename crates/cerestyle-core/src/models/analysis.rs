//! Upload request and skin-tone analysis models

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::color::{extract_colors, extract_season, ColorCode, Palette, Season};
use crate::error::StyleError;

/// Style category offered by the gender gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Tag sent to the analysis service and used in search queries
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(StyleError::InvalidInput(format!(
                "Invalid gender: {}. Must be: male or female",
                s
            ))),
        }
    }
}

/// The photo the user selected. Never empty.
#[derive(Clone)]
pub struct Photo {
    bytes: Bytes,
    file_name: String,
}

impl Photo {
    pub fn new(bytes: impl Into<Bytes>, file_name: impl Into<String>) -> Result<Self, StyleError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(StyleError::InvalidInput(
                "Selected photo is empty".to_string(),
            ));
        }

        let file_name = file_name.into();
        let file_name = if file_name.trim().is_empty() {
            "photo.jpg".to_string()
        } else {
            file_name
        };

        Ok(Self { bytes, file_name })
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Debug for Photo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One analysis submission. Moved into the analysis client and dropped after sending.
#[derive(Debug)]
pub struct UploadRequest {
    pub photo: Photo,
    pub gender: Gender,
}

impl UploadRequest {
    pub fn new(photo: Photo, gender: Gender) -> Self {
        Self { photo, gender }
    }
}

/// Raw body returned by `POST /upload`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "skinTone", default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub color_recommendation: Option<String>,
}

/// Validated analysis outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub status_message: String,
    pub skin_tone: ColorCode,
    pub palette_text: String,
    pub palette: Palette,
    pub season: Option<Season>,
}

impl TryFrom<AnalysisResponse> for AnalysisResult {
    type Error = StyleError;

    fn try_from(response: AnalysisResponse) -> Result<Self, Self::Error> {
        let status_message = non_empty(response.message)
            .ok_or_else(|| StyleError::AnalysisProtocol("response missing 'message'".to_string()))?;

        let raw_skin_tone = non_empty(response.skin_tone).ok_or_else(|| {
            StyleError::AnalysisProtocol("response missing 'skinTone'".to_string())
        })?;

        let skin_tone = ColorCode::parse_css(&raw_skin_tone).map_err(|_| {
            StyleError::AnalysisProtocol(format!(
                "'skinTone' is not a color: '{}'",
                raw_skin_tone
            ))
        })?;

        let palette_text = response.color_recommendation.ok_or_else(|| {
            StyleError::AnalysisProtocol("response missing 'color_recommendation'".to_string())
        })?;

        Ok(Self {
            palette: extract_colors(&palette_text),
            season: extract_season(&palette_text),
            status_message,
            skin_tone,
            palette_text,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
