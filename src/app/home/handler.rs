//! 首页处理器

use axum::{extract::State, response::Html};

use crate::app::{pages::IndexInfo, AppState};
use crate::core::error::CoreError;

/// `GET /`. Static apart from configuration; renders while the database is down.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, CoreError> {
    let html = state.templates.index_page(&IndexInfo {
        version: env!("CARGO_PKG_VERSION"),
        database_host: &state.config.database.host,
        database_name: &state.config.database.database,
    })?;
    Ok(Html(html))
}
