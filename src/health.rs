use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::{db, state::AppState};

#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub db: String,
}

impl HealthResponse {
    pub fn from_db(db_ok: bool) -> Self {
        if db_ok {
            Self {
                status: "ok".into(),
                db: "ok".into(),
            }
        } else {
            Self {
                status: "degraded".into(),
                db: "unavailable".into(),
            }
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses((status = 200, description = "Service and database status", body = HealthResponse))
)]
pub async fn health(State(db): State<PgPool>) -> Json<HealthResponse> {
    Json(HealthResponse::from_db(db::ping(&db).await))
}
