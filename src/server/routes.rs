//! Route handlers for the shopping-list API.
//!
//! The upstream categorization pipeline has already turned free text into
//! candidate items by the time requests arrive here; handlers validate the
//! boundary once, delegate to the store and shape responses with display
//! names from the injected catalog.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::db::ListRepository;
use crate::models::{CandidateItem, ListRecord, Progress};
use crate::server::ApiError;
use crate::slug;
use crate::view::{self, GroupedItem};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: ListRepository,
    pub catalog: Arc<Catalog>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lists", post(create_list))
        .route("/api/list/{slug}", get(get_list))
        .route("/api/list/{slug}/version", get(get_version))
        .route("/api/list/{slug}/progress", get(get_progress))
        .route("/api/list/{slug}/item/{item_id}", put(update_item))
        .route("/api/list/{slug}/edit", post(edit_list))
        .with_state(state)
}

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Deserialize)]
struct CreateListRequest {
    items: Vec<CandidateItem>,
    #[serde(default)]
    supermarket: Option<String>,
}

#[derive(Deserialize)]
struct EditListRequest {
    items: Vec<CandidateItem>,
    /// Change summary (kept/added/removed names) computed by the upstream
    /// edit interpreter; stored nowhere, echoed back opaquely.
    #[serde(default)]
    changes: serde_json::Value,
}

#[derive(Deserialize)]
struct UpdateItemRequest {
    checked: bool,
}

#[derive(Serialize)]
struct GroupResponse {
    area: String,
    area_display: String,
    items: Vec<GroupedItem>,
}

#[derive(Serialize)]
struct ListResponse {
    list_id: String,
    supermarket: Option<String>,
    supermarket_display: Option<String>,
    updated_at: String,
    groups: Vec<GroupResponse>,
}

#[derive(Serialize)]
struct EditListResponse {
    #[serde(flatten)]
    list: ListResponse,
    changes: serde_json::Value,
}

#[derive(Serialize)]
struct VersionResponse {
    updated_at: String,
}

#[derive(Serialize)]
struct UpdateItemResponse {
    success: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn list_response(record: ListRecord, catalog: &Catalog) -> ListResponse {
    let groups = view::build_groups(&record.items)
        .into_iter()
        .map(|group| GroupResponse {
            area_display: catalog.area_display(&group.area),
            area: group.area,
            items: group.items,
        })
        .collect();

    let supermarket_display = record
        .supermarket
        .as_deref()
        .and_then(|key| catalog.supermarket_display(key))
        .map(String::from);

    ListResponse {
        list_id: record.slug,
        supermarket: record.supermarket,
        supermarket_display,
        updated_at: record.updated_at,
        groups,
    }
}

/// Boundary validation for candidate item sets. Field presence is enforced
/// by deserialization; this rejects the shapes the pipeline promised not to
/// send but occasionally does anyway.
fn validate_items(items: &[CandidateItem]) -> Result<(), ApiError> {
    if items.is_empty() {
        return Err(ApiError::Invalid("No items in request".to_string()));
    }
    if items.iter().any(|item| item.name.trim().is_empty()) {
        return Err(ApiError::Invalid("Item name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_slug(value: &str) -> Result<(), ApiError> {
    if !slug::is_valid(value) {
        return Err(ApiError::Invalid("Invalid list ID format".to_string()));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn create_list(
    State(state): State<AppState>,
    Json(request): Json<CreateListRequest>,
) -> Result<Json<ListResponse>, ApiError> {
    validate_items(&request.items)?;

    if let Some(key) = &request.supermarket {
        if !state.catalog.has_supermarket(key) {
            return Err(ApiError::Invalid("Invalid supermarket".to_string()));
        }
    }

    let list_slug = state
        .repo
        .create(&request.items, request.supermarket.as_deref())
        .await?;

    let record = state
        .repo
        .get(&list_slug)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tracing::info!(slug = %list_slug, items = request.items.len(), "created list");
    Ok(Json(list_response(record, &state.catalog)))
}

async fn get_list(
    State(state): State<AppState>,
    Path(list_slug): Path<String>,
) -> Result<Json<ListResponse>, ApiError> {
    validate_slug(&list_slug)?;

    let record = state
        .repo
        .get(&list_slug)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(list_response(record, &state.catalog)))
}

async fn get_version(
    State(state): State<AppState>,
    Path(list_slug): Path<String>,
) -> Result<Json<VersionResponse>, ApiError> {
    validate_slug(&list_slug)?;

    let updated_at = state
        .repo
        .version(&list_slug)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(VersionResponse { updated_at }))
}

async fn get_progress(
    State(state): State<AppState>,
    Path(list_slug): Path<String>,
) -> Result<Json<Progress>, ApiError> {
    validate_slug(&list_slug)?;

    let progress = state
        .repo
        .progress(&list_slug)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(progress))
}

async fn update_item(
    State(state): State<AppState>,
    Path((list_slug, item_id)): Path<(String, i64)>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<UpdateItemResponse>, ApiError> {
    validate_slug(&list_slug)?;

    let updated = state
        .repo
        .set_item_checked(&list_slug, item_id, request.checked)
        .await?;

    if !updated {
        return Err(ApiError::NotFound);
    }

    Ok(Json(UpdateItemResponse { success: true }))
}

async fn edit_list(
    State(state): State<AppState>,
    Path(list_slug): Path<String>,
    Json(request): Json<EditListRequest>,
) -> Result<Json<EditListResponse>, ApiError> {
    validate_slug(&list_slug)?;
    validate_items(&request.items)?;

    let replaced = state.repo.replace_items(&list_slug, &request.items).await?;
    if !replaced {
        return Err(ApiError::NotFound);
    }

    let record = state
        .repo
        .get(&list_slug)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tracing::info!(slug = %list_slug, items = request.items.len(), "replaced list items");
    Ok(Json(EditListResponse {
        list: list_response(record, &state.catalog),
        changes: request.changes,
    }))
}
