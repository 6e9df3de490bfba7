//! In-process fakes for the upstream APIs and a driver for the full router.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use mindcare_core::MappedTurn;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::state::AppState;
use crate::upstream::{GenerativeModel, SpeechSynthesizer, UpstreamError};

/// One recorded call to [`FakeModel`].
#[derive(Debug, Clone)]
pub struct ModelCall {
    pub model: String,
    pub contents: Vec<MappedTurn>,
}

enum Reply {
    Text(String),
    Status(u16, String),
}

pub struct FakeModel {
    reply: Reply,
    calls: Mutex<Vec<ModelCall>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self { reply: Reply::Text(text.to_owned()), calls: Mutex::default() }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self { reply: Reply::Status(status, message.to_owned()), calls: Mutex::default() }
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, model: &str, contents: Vec<MappedTurn>) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(ModelCall { model: model.to_owned(), contents });
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status, message) => Err(UpstreamError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

pub struct FakeSpeech {
    audio: Result<Bytes, u16>,
    texts: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn returning(audio: &'static [u8]) -> Self {
        Self { audio: Ok(Bytes::from_static(audio)), texts: Mutex::default() }
    }

    pub fn failing(status: u16) -> Self {
        Self { audio: Err(status), texts: Mutex::default() }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str) -> Result<Bytes, UpstreamError> {
        self.texts.lock().unwrap().push(text.to_owned());
        match &self.audio {
            Ok(bytes) => Ok(bytes.clone()),
            Err(status) => Err(UpstreamError::Status { status: *status, message: "rejected".into() }),
        }
    }
}

/// The full router wired to fakes, with handles to inspect them.
pub struct TestApp {
    pub model: Arc<FakeModel>,
    pub speech: Arc<FakeSpeech>,
    state: Arc<AppState>,
}

impl TestApp {
    pub fn new(model: FakeModel) -> Self {
        Self::build(model, FakeSpeech::returning(b""), |_| {})
    }

    pub fn with_config(model: FakeModel, configure: impl FnOnce(&mut Config)) -> Self {
        Self::build(model, FakeSpeech::returning(b""), configure)
    }

    pub fn with_speech(model: FakeModel, speech: FakeSpeech) -> Self {
        Self::build(model, speech, |_| {})
    }

    fn build(model: FakeModel, speech: FakeSpeech, configure: impl FnOnce(&mut Config)) -> Self {
        let mut config = Config::default();
        config.enable_swagger = false;
        configure(&mut config);

        let model = Arc::new(model);
        let speech = Arc::new(speech);
        let state = Arc::new(AppState {
            config: Arc::new(config),
            generative: model.clone(),
            speech: speech.clone(),
        });
        Self { model, speech, state }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Bytes) {
        let response = super::build(self.state.clone())
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, bytes)
    }

    fn decode(status: StatusCode, bytes: &Bytes) -> (StatusCode, Value) {
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(bytes).expect("JSON response body")
        };
        (status, body)
    }

    pub async fn get_with_header(&self, uri: &str, name: &str, value: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(name, value)
            .body(Body::empty())
            .unwrap();
        super::build(self.state.clone())
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap();
        let (status, _, bytes) = self.send(request).await;
        Self::decode(status, &bytes)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, _, bytes) = self.post_for_bytes(uri, body).await;
        Self::decode(status, &bytes)
    }

    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_owned()))
            .unwrap();
        let (status, _, bytes) = self.send(request).await;
        Self::decode(status, &bytes)
    }

    pub async fn post_for_bytes(&self, uri: &str, body: Value) -> (StatusCode, Option<String>, Bytes) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}
