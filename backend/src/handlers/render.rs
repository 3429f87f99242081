// src/handlers/render.rs

use axum::{Json, response::IntoResponse};
use serde_json::Value;
use validator::Validate;

use crate::{
    error::AppError,
    models::view::{HtmlResponse, PreviewRequest, SanitizeRequest},
    utils::{delta::render_value, html::sanitize},
    viewer,
};

/// Builds the view of a dropped file. Nothing is written to disk.
pub async fn preview(Json(req): Json<PreviewRequest>) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let name = req
        .file_name
        .strip_suffix(".json")
        .unwrap_or(&req.file_name);
    let view = viewer::build_view(name, &req.document, None)?;

    tracing::info!("Previewed dropped file {}", req.file_name);

    Ok(Json(view))
}

/// Renders a delta to HTML. The output is not sanitized.
pub async fn render_delta(Json(delta): Json<Value>) -> impl IntoResponse {
    Json(HtmlResponse {
        html: render_value(&delta),
    })
}

/// Runs a fragment through the allow-list sanitizer.
pub async fn sanitize_html(Json(req): Json<SanitizeRequest>) -> impl IntoResponse {
    Json(HtmlResponse {
        html: sanitize(&req.html),
    })
}
