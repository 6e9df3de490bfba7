//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::upstream::{ElevenLabsClient, GeminiClient, GenerativeModel, SpeechSynthesizer};

/// State shared across all HTTP handlers.
///
/// Nothing here is mutated after startup; every request is independent.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Generative-language API used by chat, sentiment and recommendations.
    pub generative: Arc<dyn GenerativeModel>,
    /// Text-to-speech API.
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    /// Wire the production upstream clients from `config`.
    pub fn from_config(config: Config) -> Self {
        let generative = Arc::new(GeminiClient::from_config(&config.gemini));
        let speech = Arc::new(ElevenLabsClient::new(config.speech.clone()));
        Self {
            config: Arc::new(config),
            generative,
            speech,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").field("config", &self.config).finish_non_exhaustive()
    }
}
