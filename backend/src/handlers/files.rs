// src/handlers/files.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{catalog::FileCatalog, error::AppError, viewer};

/// Query parameters for listing files.
#[derive(Debug, Deserialize, Validate)]
pub struct ListParams {
    #[validate(length(max = 100))]
    pub q: Option<String>,
}

/// Lists the catalog, optionally filtered by a search keyword.
pub async fn list_files(
    State(catalog): State<Arc<FileCatalog>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let files = catalog.search(params.q.as_deref().unwrap_or_default());

    Ok(Json(files))
}

/// Loads one document and returns its full view.
pub async fn get_file(
    State(catalog): State<Arc<FileCatalog>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let file = catalog.load(&name).await?;
    let view = viewer::build_view(&name, &file.json, file.modified_at)?;

    tracing::info!("Opened {}", name);

    Ok(Json(view))
}

/// Returns the document's JSON, pretty-printed.
pub async fn get_raw(
    State(catalog): State<Arc<FileCatalog>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let file = catalog.load(&name).await?;
    let pretty = serde_json::to_string_pretty(&file.json)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], pretty))
}
