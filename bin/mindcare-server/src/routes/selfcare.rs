//! Self-care checklist (`/api/self-care`).

use std::sync::Arc;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use mindcare_core::selfcare::{self, Activity, Completion};
use utoipa::OpenApi;

use crate::schemas::wellness::{ActivitiesQuery, ActivitiesResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_activities),
    components(schemas(Activity, Completion, ActivitiesResponse))
)]
pub struct SelfCareApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/self-care/activities", get(list_activities))
}

/// The checklist with the caller's checked items, optionally narrowed to one
/// category. Completion always counts the whole checklist.
#[utoipa::path(
    get,
    path = "/api/self-care/activities",
    tag = "wellness",
    params(ActivitiesQuery),
    responses((status = 200, description = "Activities and completion", body = ActivitiesResponse))
)]
pub async fn list_activities(Query(query): Query<ActivitiesQuery>) -> Json<ActivitiesResponse> {
    let mut activities = selfcare::default_activities();
    if let Some(raw) = query.completed.as_deref() {
        activities = selfcare::check_only(activities, &selfcare::parse_ids(raw));
    }
    let completion = selfcare::completion(&activities);
    let activities = selfcare::filter(activities, query.category.as_deref());
    Json(ActivitiesResponse { activities, completion })
}
