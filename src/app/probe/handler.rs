//! 数据库探测处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use tracing::warn;

use super::model::ProbeReport;
use crate::app::AppState;
use crate::core::{error::CoreError, response::ApiResponse};

/// `GET /db-test`
pub async fn db_test_page(
    State(state): State<AppState>,
) -> Result<(StatusCode, Html<String>), CoreError> {
    let (status, html) = match state.probe.check().await {
        Ok(report) => (StatusCode::OK, state.templates.db_test_page(Ok(&report))?),
        Err(e) => {
            warn!(error = %e, "Database probe failed");
            let message = e.to_string();
            (
                StatusCode::SERVICE_UNAVAILABLE,
                state.templates.db_test_page(Err(&message))?,
            )
        }
    };
    Ok((status, Html(html)))
}

/// `GET /api/health/db`
pub async fn db_health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProbeReport>>, CoreError> {
    let report = state.probe.check().await.map_err(|e| {
        warn!(error = %e, "Database probe failed");
        CoreError::ServiceUnavailable(e.to_string())
    })?;
    Ok(Json(ApiResponse::success(report)))
}
