//! Outfit image search client (keyed `GET` search endpoint)

use async_trait::async_trait;
use cerestyle_core::models::{ColorCode, Gender, OutfitItem, OUTFIT_PAGE_SIZE};
use cerestyle_core::{OutfitSearchService, StyleConfig, StyleError};
use serde::{Deserialize, Serialize};

use crate::{Auth, HttpClient};

/// Search API response. Only the fields the client reads are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSearchResponse {
    pub photos: Vec<SearchPhoto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPhoto {
    #[serde(default)]
    pub src: Option<PhotoSources>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoSources {
    #[serde(default)]
    pub medium: Option<String>,
}

/// Free-text query; the search service is keyword based, not color aware.
pub fn build_query(color: &ColorCode, gender: Gender) -> String {
    format!("{} outfit {}", gender, color)
}

impl PhotoSearchResponse {
    /// Map results to outfit items, dropping entries without a medium image.
    pub fn into_outfits(self, gender: Gender) -> Vec<OutfitItem> {
        self.photos
            .into_iter()
            .filter_map(|photo| {
                let image_url = photo
                    .src
                    .and_then(|src| src.medium)
                    .filter(|url| !url.trim().is_empty())?;

                let label = photo
                    .alt
                    .filter(|alt| !alt.trim().is_empty())
                    .unwrap_or_else(|| format!("{} outfit", gender));

                Some(OutfitItem { image_url, label })
            })
            .collect()
    }
}

/// Fetches example outfit images for a palette color
#[derive(Clone, Debug)]
pub struct OutfitSearchClient {
    http: HttpClient,
    search_url: String,
}

impl OutfitSearchClient {
    pub fn new(config: &StyleConfig) -> Result<Self, StyleError> {
        let http = HttpClient::new(
            config.http_timeout(),
            Auth::ApiKey(config.search_api_key.clone()),
        )
        .map_err(|e| StyleError::Config(e.to_string()))?;

        Ok(Self {
            http,
            search_url: config.search_url.clone(),
        })
    }
}

#[async_trait]
impl OutfitSearchService for OutfitSearchClient {
    async fn search_outfits(
        &self,
        color: &ColorCode,
        gender: Gender,
    ) -> Result<Vec<OutfitItem>, StyleError> {
        let query = build_query(color, gender);
        tracing::debug!(query = %query, "Searching outfit images");

        let params = [
            ("query", query.clone()),
            ("per_page", OUTFIT_PAGE_SIZE.to_string()),
        ];

        let response: PhotoSearchResponse = self
            .http
            .get(&self.search_url, &params)
            .await
            .map_err(|e| StyleError::SearchTransport(e.to_string()))?;

        let returned = response.photos.len();
        let outfits = response.into_outfits(gender);

        if outfits.len() < returned {
            tracing::debug!(
                dropped = returned - outfits.len(),
                "Dropped search results without a usable image"
            );
        }
        tracing::info!(query = %query, outfits = outfits.len(), "Outfit search completed");

        Ok(outfits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn color(s: &str) -> ColorCode {
        ColorCode::parse(s).unwrap()
    }

    fn client_for(server: &mockito::Server) -> OutfitSearchClient {
        let config = StyleConfig::new(
            "http://analysis.invalid",
            format!("{}/v1/search", server.url()),
            "test-api-key",
        );
        OutfitSearchClient::new(&config).unwrap()
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query(&color("#FF5733"), Gender::Male),
            "male outfit #FF5733"
        );
    }

    #[test]
    fn test_into_outfits_drops_missing_images() {
        let body = r#"{"photos":[
            {"src":{"medium":"https://img/1.jpg"},"alt":"Linen shirt"},
            {"src":{},"alt":"no medium"},
            {"alt":"no src"},
            {"src":{"medium":""},"alt":"blank"},
            {"src":{"medium":"https://img/2.jpg"},"alt":""}
        ]}"#;
        let response: PhotoSearchResponse = serde_json::from_str(body).unwrap();
        let outfits = response.into_outfits(Gender::Female);

        assert_eq!(
            outfits,
            vec![
                OutfitItem {
                    image_url: "https://img/1.jpg".to_string(),
                    label: "Linen shirt".to_string(),
                },
                OutfitItem {
                    image_url: "https://img/2.jpg".to_string(),
                    label: "female outfit".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_sends_key_query_and_page_size() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/search")
            .match_header("authorization", "test-api-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".to_string(), "female outfit #33FF57".to_string()),
                Matcher::UrlEncoded("per_page".to_string(), "6".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"page":1,"per_page":6,"photos":[{"id":1,"src":{"medium":"https://img/m.jpg","large":"https://img/l.jpg"},"alt":"Green dress"}]}"#,
            )
            .create_async()
            .await;

        let outfits = client_for(&server)
            .search_outfits(&color("#33FF57"), Gender::Female)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outfits.len(), 1);
        assert_eq!(outfits[0].image_url, "https://img/m.jpg");
        assert_eq!(outfits[0].label, "Green dress");
    }

    #[tokio::test]
    async fn test_search_failure_is_search_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error":"Unauthorized"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .search_outfits(&color("#FF5733"), Gender::Male)
            .await
            .unwrap_err();
        assert!(matches!(err, StyleError::SearchTransport(_)));
    }

    #[tokio::test]
    async fn test_search_missing_photos_is_search_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total_results":0}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .search_outfits(&color("#FF5733"), Gender::Male)
            .await
            .unwrap_err();
        assert!(matches!(err, StyleError::SearchTransport(_)));
    }
}
