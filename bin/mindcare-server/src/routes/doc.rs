use crate::routes::{gemini, health, journal, moods, progress, selfcare, speech};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "mindcare-server",
    description = "MindCare wellness companion API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(gemini::GeminiApi::openapi());
    root.merge(speech::SpeechApi::openapi());
    root.merge(moods::MoodsApi::openapi());
    root.merge(journal::JournalApi::openapi());
    root.merge(selfcare::SelfCareApi::openapi());
    root.merge(progress::ProgressApi::openapi());
    root
}
