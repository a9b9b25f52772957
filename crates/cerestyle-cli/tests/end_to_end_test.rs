//! Full flow over HTTP: real clients, coordinator, and a mocked backend.
//!
//! Run with: `cargo test -p cerestyle-cli --test end_to_end_test`

use std::sync::Arc;

use cerestyle_api_client::{OutfitSearchClient, RecommendationClient};
use cerestyle_core::models::{Gender, Photo};
use cerestyle_core::StyleConfig;
use cerestyle_pipeline::{ErrorSource, Phase, PipelineCoordinator, RunOutcome};
use mockito::Matcher;

fn coordinator_for(server: &mockito::Server) -> PipelineCoordinator {
    let config = StyleConfig::new(
        server.url(),
        format!("{}/v1/search", server.url()),
        "e2e-key",
    );
    PipelineCoordinator::new(
        Arc::new(RecommendationClient::new(&config).unwrap()),
        Arc::new(OutfitSearchClient::new(&config).unwrap()),
    )
}

fn photo() -> Photo {
    Photo::new(b"portrait-bytes".to_vec(), "portrait.png").unwrap()
}

#[tokio::test]
async fn test_photo_to_outfits() {
    let mut server = mockito::Server::new_async().await;
    let upload = server
        .mock("POST", "/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r##"{"message":"Color recommendation generated","skinTone":"rgb(198, 134, 66)","color_recommendation":"Season: autumn Colors: #FF5733, #33FF57, #3357FF"}"##,
        )
        .expect(1)
        .create_async()
        .await;
    let search = server
        .mock("GET", "/v1/search")
        .match_header("authorization", "e2e-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".to_string(), "male outfit #FF5733".to_string()),
            Matcher::UrlEncoded("per_page".to_string(), "6".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"photos":[
                {"src":{"medium":"https://images.example/a.jpg"},"alt":"Rust linen blazer"},
                {"src":{"medium":"https://images.example/b.jpg"},"alt":"Olive chinos"}
            ]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let coordinator = coordinator_for(&server);
    coordinator.select_file(photo());
    coordinator.submit().unwrap();
    let outcome = coordinator.choose_gender(Gender::Male).await.unwrap();

    upload.assert_async().await;
    search.assert_async().await;
    assert_eq!(outcome, RunOutcome::Completed);

    let state = coordinator.state();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.skin_tone.as_ref().map(|c| c.as_str()), Some("#C68642"));
    assert_eq!(state.palette.len(), 3);
    assert_eq!(state.outfits.len(), 2);
    assert_eq!(state.outfits[0].label, "Rust linen blazer");
    assert_eq!(
        state.swatches()[2].meaning,
        "Blue conveys tranquility, stability, trust, and confidence."
    );
}

#[tokio::test]
async fn test_protocol_error_never_reaches_search() {
    let mut server = mockito::Server::new_async().await;
    let _upload = server
        .mock("POST", "/upload")
        .with_status(200)
        .with_body(r##"{"message":"ok","color_recommendation":"#FF5733"}"##)
        .create_async()
        .await;
    let search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let coordinator = coordinator_for(&server);
    coordinator.select_file(photo());
    coordinator.submit().unwrap();
    coordinator.choose_gender(Gender::Female).await.unwrap();

    search.assert_async().await;
    let state = coordinator.state();
    assert_eq!(state.phase, Phase::Error);
    assert_eq!(state.error.unwrap().source, ErrorSource::Analysis);
}
