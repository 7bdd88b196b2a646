// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document export routes.

use crate::error::Result;
use crate::export::{Document, ExportKind};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/export/{kind}", get(get_export))
        .route("/api/export/{kind}/download", get(download_export))
}

/// Paginated document, ready for the frontend's PDF writer.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExportResponse {
    pub title: String,
    pub filename: String,
    /// Wrapped body lines, one array per page
    pub pages: Vec<Vec<String>>,
}

impl From<Document> for ExportResponse {
    fn from(doc: Document) -> Self {
        Self {
            title: doc.title,
            filename: doc.filename,
            pages: doc.pages.into_iter().map(|page| page.lines).collect(),
        }
    }
}

async fn get_export(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<ExportKind>,
) -> Result<Json<ExportResponse>> {
    let doc = state.controller.export(kind).await?;
    Ok(Json(doc.into()))
}

/// Plain-text rendering as an attachment.
async fn download_export(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<ExportKind>,
) -> Result<impl IntoResponse> {
    let doc = state.controller.export(kind).await?;
    let stem = doc.filename.trim_end_matches(".pdf");
    let disposition = format!("attachment; filename=\"{}.txt\"", stem);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.render_text(),
    ))
}
