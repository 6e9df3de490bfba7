//! Speech-synthesis API client (ElevenLabs text-to-speech).

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{SpeechSynthesizer, UpstreamError, error_message};
use crate::config::SpeechConfig;

const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    cfg: SpeechConfig,
}

impl ElevenLabsClient {
    pub fn new(cfg: SpeechConfig) -> Self {
        Self { client: Client::new(), cfg }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.voice_id
        )
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<Bytes, UpstreamError> {
        debug!(voice = %self.cfg.voice_id, text_len = text.len(), "calling text-to-speech");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.cfg.api_key)
            .json(&SpeechRequest {
                text,
                model_id: &self.cfg.model_id,
                voice_settings: VoiceSettings {
                    stability: self.cfg.stability,
                    similarity_boost: self.cfg.similarity_boost,
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            debug!("text-to-speech returned an empty body");
        }
        Ok(audio)
    }
}
