use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ErrorServer;
use crate::page::{self, Outcome};
use crate::AppState;

pub const DOWNLOAD_FILE_NAME: &str = "ringkasan.txt";

#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub characters: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub device: String,
}

pub async fn index() -> Html<String> {
    Html(page::render("", None))
}

pub async fn summarize_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SummarizeForm>,
) -> Html<String> {
    let outcome = Outcome::from(state.generator.generate(&form.text).await);
    Html(page::render(&form.text, Some(&outcome)))
}

pub async fn download(Form(form): Form<DownloadForm>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        form.summary,
    )
}

pub async fn api_summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ErrorServer> {
    let summary = state.generator.generate(&request.text).await?;
    Ok(Json(SummarizeResponse {
        characters: summary.char_count(),
        summary: summary.into_inner(),
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model = state.generator.model();
    Json(HealthResponse {
        status: "ok".to_string(),
        model: model.name().to_string(),
        device: model.device(),
    })
}
