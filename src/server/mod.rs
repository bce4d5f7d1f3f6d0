use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::archive::DOWNLOADS_ROUTE;
use crate::errors::SiteGenError;
use crate::pipeline::Pipeline;
use crate::safety::is_servable_archive_name;
use crate::store::ItemStore;
use crate::wire::{GenerateRequest, GenerateResponse, HistoryEntry};

pub struct AppState {
    pub pipeline: Pipeline,
    pub items: ItemStore,
    pub downloads_dir: PathBuf,
    pub history_limit: usize,
}

struct ApiError(SiteGenError);

impl From<SiteGenError> for ApiError {
    fn from(e: SiteGenError) -> Self {
        ApiError(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("rejected request body: {rejection}");
        ApiError(SiteGenError::Validation(rejection.body_text()))
    }
}

fn status_for(e: &SiteGenError) -> StatusCode {
    match e {
        SiteGenError::Validation(_) => StatusCode::BAD_REQUEST,
        SiteGenError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.0.to_string() }));
        (status_for(&self.0), body).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/api/history", get(history))
        .route("/api/crud/data", get(list_items).post(create_item))
        .route("/api/crud/data/{id}", put(update_item).delete(delete_item))
        .route(&format!("{DOWNLOADS_ROUTE}/{{file}}"), get(download))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    log::info!("Server running on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    let Json(req) = body?;
    let (resp, err) = state.pipeline.handle_generate(&req).await;
    let status = err.as_ref().map_or(StatusCode::OK, status_for);
    Ok((status, Json(resp)))
}

// Typed body so each entry's generatedFiles keeps its original order.
#[derive(Serialize)]
struct HistoryBody {
    success: bool,
    history: Vec<HistoryEntry>,
}

async fn history(State(state): State<Arc<AppState>>) -> Result<Json<HistoryBody>, ApiError> {
    let history = state.pipeline.history().list_recent(state.history_limit).await?;
    Ok(Json(HistoryBody { success: true, history }))
}

async fn list_items(State(state): State<Arc<AppState>>) -> ApiResult {
    let data = state.items.list().await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult {
    let Json(fields) = body?;
    let item = state.items.create(fields).await?;
    Ok(Json(json!({ "success": true, "item": item })))
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult {
    let Json(fields) = body?;
    let item = state.items.update(&id, fields).await?;
    Ok(Json(json!({ "success": true, "item": item })))
}

async fn delete_item(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult {
    state.items.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

async fn download(State(state): State<Arc<AppState>>, Path(file): Path<String>) -> Response {
    if !is_servable_archive_name(&file) {
        return StatusCode::NOT_FOUND.into_response();
    }
    match tokio::fs::read(state.downloads_dir.join(&file)).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file}\"")),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
