use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use serde_json::Value;

use crate::tutor::{self, TutorQuery};
use crate::AppState;

use super::error::ApiError;
use super::models::{ErrorResponse, ServiceInfo, TutorResponse};

/// Fields are read from the raw object so that type mismatches get the same
/// field-level detail as missing values.
pub async fn ask_tutor(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TutorResponse>, ApiError> {
    let Json(payload) = payload?;
    let Value::Object(fields) = payload else {
        return Err(ApiError::InvalidInput(
            "request body must be a JSON object".to_string(),
        ));
    };
    let query = TutorQuery::validate(fields.get("message"), fields.get("stress_level"))?;

    let answer = tutor::ask_tutor(state.generator.as_ref(), query).await?;

    Ok(Json(TutorResponse {
        response: answer.response,
        stress_level: answer.stress_level.get(),
    }))
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "AI Tutor API".to_string(),
        description: "Stress-adaptive AI tutor for neurodiverse students".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: "route not found".to_string(),
        }),
    )
        .into_response()
}
