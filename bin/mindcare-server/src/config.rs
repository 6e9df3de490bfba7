//! Server configuration, loaded from environment variables at startup.

use mindcare_core::HistoryPolicy;
use tracing::warn;

/// Runtime configuration for mindcare-server.
///
/// Every field has a sensible default so the server starts without any
/// environment variables set. Missing API keys are not an error here: the
/// upstream rejects the empty credential and the handler reports its usual
/// generic failure.
///
/// `GEMINI_API_KEY` and `ELEVEN_LABS_KEY` are read once, when the server
/// starts. Rotating a key requires a restart.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// When set, logs are also written to a daily rolling file in this directory.
    pub log_dir: Option<String>,

    /// Comma-separated list of allowed CORS origins; wildcard when unset.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Largest request body accepted, in bytes; larger bodies get 413.
    pub max_body_bytes: usize,

    pub gemini: GeminiConfig,

    pub speech: SpeechConfig,

    /// How chat history is normalized before it is sent upstream.
    pub history_policy: HistoryPolicy,
}

/// Generative-language API settings.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model used for conversational replies.
    pub chat_model: String,
    /// Model used for sentiment and recommendation prompts.
    pub analysis_model: String,
}

/// Speech-synthesis API settings.
#[derive(Clone)]
pub struct SpeechConfig {
    pub api_key: String,
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl SpeechConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// API keys must never end up in logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("analysis_model", &self.analysis_model)
            .finish()
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("voice_id", &self.voice_id)
            .field("model_id", &self.model_id)
            .field("stability", &self.stability)
            .field("similarity_boost", &self.similarity_boost)
            .finish()
    }
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SPEECH_BASE_URL: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_SPEECH_MODEL: &str = "eleven_monolingual_v1";

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let history_policy = match lookup("MINDCARE_HISTORY_POLICY") {
            None => HistoryPolicy::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "unknown MINDCARE_HISTORY_POLICY; using user-first");
                HistoryPolicy::default()
            }),
        };

        Self {
            bind_address: env_or("MINDCARE_BIND", "0.0.0.0:3000"),
            log_level: env_or("MINDCARE_LOG", "info"),
            log_json: flag("MINDCARE_LOG_JSON", false),
            log_dir: lookup("MINDCARE_LOG_DIR").filter(|v| !v.is_empty()),
            cors_allowed_origins: lookup("MINDCARE_CORS_ORIGINS"),
            enable_swagger: flag("MINDCARE_ENABLE_SWAGGER", true),
            max_body_bytes: parse_or(lookup("MINDCARE_MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES),
            gemini: GeminiConfig {
                api_key: env_or("GEMINI_API_KEY", ""),
                base_url: env_or("MINDCARE_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                chat_model: env_or("MINDCARE_CHAT_MODEL", DEFAULT_GEMINI_MODEL),
                analysis_model: env_or("MINDCARE_ANALYSIS_MODEL", DEFAULT_GEMINI_MODEL),
            },
            speech: SpeechConfig {
                api_key: env_or("ELEVEN_LABS_KEY", ""),
                base_url: env_or("MINDCARE_SPEECH_BASE_URL", DEFAULT_SPEECH_BASE_URL),
                voice_id: env_or("MINDCARE_VOICE_ID", DEFAULT_VOICE_ID),
                model_id: env_or("MINDCARE_SPEECH_MODEL", DEFAULT_SPEECH_MODEL),
                stability: parse_or(lookup("MINDCARE_VOICE_STABILITY"), 0.5),
                similarity_boost: parse_or(lookup("MINDCARE_VOICE_SIMILARITY"), 0.75),
            },
            history_policy,
        }
    }

    /// Log a warning for every upstream credential that is not configured.
    pub fn warn_missing_secrets(&self) {
        if !self.gemini.is_configured() {
            warn!("GEMINI_API_KEY is not set; generative endpoints will fail");
        }
        if !self.speech.is_configured() {
            warn!("ELEVEN_LABS_KEY is not set; speech endpoint will fail");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}
