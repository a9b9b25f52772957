//! Scripted service fakes for coordinator tests.
//!
//! Each call to a fake pops the next scripted response. A response can be
//! given up front (`respond_with`) or held back (`deferred`) so a test can
//! observe the pipeline while a call is in flight.

#![allow(dead_code)]

use async_trait::async_trait;
use cerestyle_core::models::{
    AnalysisResponse, AnalysisResult, ColorCode, Gender, OutfitItem, Photo, UploadRequest,
};
use cerestyle_core::{AnalysisService, OutfitSearchService, StyleError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type Reply<T> = oneshot::Receiver<Result<T, StyleError>>;

pub fn photo() -> Photo {
    Photo::new(b"fake-jpeg-bytes".to_vec(), "selfie.jpg").unwrap()
}

/// Build a result the way the analysis client would from a response body
pub fn analysis(
    skin_tone: Option<&str>,
    color_recommendation: &str,
) -> Result<AnalysisResult, StyleError> {
    AnalysisResult::try_from(AnalysisResponse {
        message: Some("Color recommendation generated".to_string()),
        skin_tone: skin_tone.map(str::to_string),
        color_recommendation: Some(color_recommendation.to_string()),
    })
}

pub fn outfits(count: usize) -> Vec<OutfitItem> {
    (0..count)
        .map(|i| OutfitItem {
            image_url: format!("https://images.example/{}.jpg", i),
            label: format!("Look {}", i),
        })
        .collect()
}

struct Script<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
}

impl<T> Script<T> {
    fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
        }
    }

    fn respond_with(&self, reply: Result<T, StyleError>) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(reply);
        self.replies.lock().unwrap().push_back(rx);
    }

    fn deferred(&self) -> oneshot::Sender<Result<T, StyleError>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(rx);
        tx
    }

    async fn next(&self, unscripted: StyleError) -> Result<T, StyleError> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(rx) => rx.await.unwrap_or(Err(unscripted)),
            None => Err(unscripted),
        }
    }
}

pub struct ScriptedAnalysis {
    script: Script<AnalysisResult>,
    calls: Mutex<Vec<(Gender, String)>>,
}

impl ScriptedAnalysis {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Script::new(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn respond_with(&self, reply: Result<AnalysisResult, StyleError>) {
        self.script.respond_with(reply);
    }

    pub fn deferred(&self) -> oneshot::Sender<Result<AnalysisResult, StyleError>> {
        self.script.deferred()
    }

    pub fn calls(&self) -> Vec<(Gender, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysis {
    async fn analyze(&self, request: UploadRequest) -> Result<AnalysisResult, StyleError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.gender, request.photo.file_name().to_string()));
        self.script
            .next(StyleError::AnalysisTransport("unscripted call".to_string()))
            .await
    }
}

pub struct ScriptedSearch {
    script: Script<Vec<OutfitItem>>,
    queries: Mutex<Vec<(String, Gender)>>,
}

impl ScriptedSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Script::new(),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn respond_with(&self, reply: Result<Vec<OutfitItem>, StyleError>) {
        self.script.respond_with(reply);
    }

    pub fn deferred(&self) -> oneshot::Sender<Result<Vec<OutfitItem>, StyleError>> {
        self.script.deferred()
    }

    pub fn queries(&self) -> Vec<(String, Gender)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutfitSearchService for ScriptedSearch {
    async fn search_outfits(
        &self,
        color: &ColorCode,
        gender: Gender,
    ) -> Result<Vec<OutfitItem>, StyleError> {
        self.queries
            .lock()
            .unwrap()
            .push((color.as_str().to_string(), gender));
        self.script
            .next(StyleError::SearchTransport("unscripted call".to_string()))
            .await
    }
}
