//! Axum route handlers for the Render API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{
    export_filename, export_paginated, export_screen, Metadata, PaginatedDocument, PdfWriter,
    ScreenView,
};
use crate::layout::{LayoutDescriptor, LayoutVariant};
use crate::models::{ResumeData, SectionDescriptor, TemplateSettings};
use crate::pipeline::{render_document, RenderInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body shared by every render endpoint.
///
/// `resume` is taken as raw JSON and read leniently, so a partially filled
/// editor state still renders.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub resume: Value,
    #[serde(default)]
    pub settings: Option<TemplateSettings>,
    #[serde(default)]
    pub sections: Option<Vec<SectionDescriptor>>,
    #[serde(default)]
    pub layout: Option<String>,
}

impl RenderRequest {
    fn into_input(self, default_layout: LayoutVariant) -> Result<RenderInput, AppError> {
        let layout = match self.layout.as_deref() {
            Some(name) => name.parse::<LayoutVariant>().map_err(AppError::Validation)?,
            None => default_layout,
        };
        Ok(RenderInput {
            resume: ResumeData::from_value(&self.resume),
            settings: self.settings,
            sections: self.sections,
            layout,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    #[serde(flatten)]
    pub descriptor: LayoutDescriptor,
    pub default_settings: TemplateSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    pub filename: String,
    pub document: PaginatedDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/layouts
pub async fn handle_list_layouts() -> Json<Vec<LayoutInfo>> {
    Json(
        LayoutVariant::ALL
            .iter()
            .map(|variant| {
                let descriptor = variant.descriptor();
                LayoutInfo {
                    default_settings: descriptor.default_settings(),
                    descriptor,
                }
            })
            .collect(),
    )
}

/// POST /api/v1/render
///
/// Live-preview render. Cheap enough to run on the request task.
pub async fn handle_render_screen(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<ScreenView>, AppError> {
    let Json(request) = payload?;
    let input = request.into_input(state.config.default_layout)?;
    let tree = render_document(&input, &state.registry);
    Ok(Json(export_screen(&tree)?))
}

/// POST /api/v1/render/paginated
///
/// Returns the positioned page layout as JSON alongside the download name.
pub async fn handle_render_paginated(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<PaginatedResponse>, AppError> {
    let Json(request) = payload?;
    let input = request.into_input(state.config.default_layout)?;
    let filename = export_filename(input.resume.personal.name.as_deref());
    let document = paginate_blocking(&state, input).await?;
    Ok(Json(PaginatedResponse { filename, document }))
}

/// POST /api/v1/render/pdf
///
/// Streams a PDF attachment named after the person on the resume.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let export_id = Uuid::new_v4();
    let Json(request) = payload?;
    let input = request.into_input(state.config.default_layout)?;
    let name = input.resume.personal.name.clone().filter(|n| !n.trim().is_empty());
    let filename = export_filename(name.as_deref());
    info!(%export_id, layout = input.layout.as_str(), "Starting PDF export");

    let document = paginate_blocking(&state, input).await?;
    let pages = document.page_count();
    let metadata = Metadata {
        title: Some(match &name {
            Some(name) => format!("{name} - Resume"),
            None => "Resume".to_string(),
        }),
        author: name,
        created: Utc::now(),
    };
    let pdf = tokio::task::spawn_blocking(move || PdfWriter::new().write(&document, &metadata))
        .await
        .map_err(|err| {
            error!(%export_id, "PDF writer task failed: {err}");
            AppError::ExportFailed("the document could not be written".to_string())
        })?;

    info!(%export_id, pages, bytes = pdf.len(), "PDF export finished");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(pdf),
    ))
}

/// Renders and paginates on the blocking pool, against an owned snapshot of
/// the request. A panic inside the task surfaces as an export failure.
async fn paginate_blocking(
    state: &AppState,
    input: RenderInput,
) -> Result<PaginatedDocument, AppError> {
    let registry = state.registry.clone();
    let page_box = state.config.page_box;
    let document = tokio::task::spawn_blocking(move || {
        let tree = render_document(&input, &registry);
        export_paginated(&tree, &page_box)
    })
    .await
    .map_err(|err| {
        error!("Pagination task failed: {err}");
        AppError::ExportFailed("the layout could not be completed".to_string())
    })??;
    Ok(document)
}
