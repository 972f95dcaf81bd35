use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::adapters::AdapterRegistry;
use super::brief::{BriefView, DocumentFormat};
use super::domain::{Acknowledgement, Change, InventoryItem, MenuItem, Review, User};
use super::services::{BriefService, InventoryService, ReviewService};
use super::store::{
    InMemoryStore, InventoryUpdate, NewChange, NewReview, NewUser, SeedSummary, StoreExport,
};
use super::themes::ThemeCount;
use super::window::ReviewWindow;
use crate::error::AppError;

/// Shared handler state. Every field is cheap to clone.
#[derive(Clone)]
pub struct OpsState {
    pub inventory: InventoryService,
    pub reviews: ReviewService,
    pub briefs: BriefService,
    pub store: Arc<InMemoryStore>,
    pub brief_window: ReviewWindow,
    pub adapters: Vec<&'static str>,
}

impl OpsState {
    pub fn from_registry(registry: &AdapterRegistry, brief_window: ReviewWindow) -> Self {
        let store = registry.store();
        let inventory = InventoryService::new(registry.inventory());
        let reviews = ReviewService::new(registry.reviews());
        let briefs = BriefService::new(inventory.clone(), reviews.clone(), store.clone());

        Self {
            inventory,
            reviews,
            briefs,
            store,
            brief_window,
            adapters: registry.flag_names(),
        }
    }
}

pub fn ops_router(state: OpsState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .route("/api/v1/menu", get(list_menu_handler).post(upsert_menu_handler))
        .route("/api/v1/inventory", get(list_inventory_handler))
        .route("/api/v1/inventory/:item_id", put(update_inventory_handler))
        .route(
            "/api/v1/reviews",
            get(list_reviews_handler).post(create_review_handler),
        )
        .route("/api/v1/themes", get(themes_handler))
        .route(
            "/api/v1/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/api/v1/changes",
            get(list_changes_handler).post(create_change_handler),
        )
        .route(
            "/api/v1/changes/:change_id",
            axum::routing::delete(delete_change_handler),
        )
        .route(
            "/api/v1/changes/:change_id/deactivate",
            post(deactivate_change_handler),
        )
        .route(
            "/api/v1/changes/:change_id/acknowledgements",
            get(list_acknowledgements_handler).post(acknowledge_handler),
        )
        .route("/api/v1/brief/today", get(brief_handler))
        .route("/api/v1/brief/today/export", get(brief_export_handler))
        .route("/api/v1/brief/today/pdf", get(brief_export_handler))
        .route("/api/v1/admin/inject-data", post(inject_data_handler))
        .route("/api/v1/admin/clear-data", post(clear_data_handler))
        .route("/api/v1/admin/export-data", get(export_data_handler))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

impl DaysQuery {
    fn window(&self, fallback: ReviewWindow) -> Result<ReviewWindow, AppError> {
        match self.days {
            Some(days) => Ok(ReviewWindow::new(days)?),
            None => Ok(fallback),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: DocumentFormat,
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgeRequest {
    pub user_id: String,
}

/// Unwraps query parameters, turning malformed ones into the JSON error body.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

async fn health_handler(State(state): State<OpsState>) -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "adapters": state.adapters }))
}

async fn ping_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "pong", "timestamp": Utc::now() }))
}

async fn list_menu_handler(
    State(state): State<OpsState>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    Ok(Json(state.store.menu_items()?))
}

async fn upsert_menu_handler(
    State(state): State<OpsState>,
    Json(item): Json<MenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    if item.item_id.trim().is_empty() || item.name.trim().is_empty() {
        return Err(AppError::InvalidInput("menu item id and name are required".to_string()));
    }
    let item = state.store.upsert_menu_item(item)?;
    tracing::info!(item_id = %item.item_id, active = item.active, "menu item saved");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_inventory_handler(
    State(state): State<OpsState>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    Ok(Json(state.inventory.snapshot()?))
}

async fn update_inventory_handler(
    State(state): State<OpsState>,
    Path(item_id): Path<String>,
    Json(update): Json<InventoryUpdate>,
) -> Result<Json<InventoryItem>, AppError> {
    let item = state.store.update_inventory(&item_id, update, Utc::now())?;
    tracing::info!(item_id = %item.item_id, status = %item.status, "inventory updated");
    Ok(Json(item))
}

async fn list_reviews_handler(
    State(state): State<OpsState>,
    query: Result<Query<DaysQuery>, QueryRejection>,
) -> Result<Json<Vec<Review>>, AppError> {
    let window = query_params(query)?.window(ReviewWindow::default())?;
    Ok(Json(state.reviews.recent(window, Utc::now())?))
}

async fn create_review_handler(
    State(state): State<OpsState>,
    Json(review): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    if review.source.trim().is_empty() {
        return Err(AppError::InvalidInput("review source is required".to_string()));
    }
    let review = state.store.insert_review(review, Utc::now())?;
    tracing::debug!(review_id = %review.review_id, rating = review.rating, "review stored");
    Ok((StatusCode::CREATED, Json(review)))
}

async fn themes_handler(
    State(state): State<OpsState>,
    query: Result<Query<DaysQuery>, QueryRejection>,
) -> Result<Json<Vec<ThemeCount>>, AppError> {
    let window = query_params(query)?.window(ReviewWindow::default())?;
    Ok(Json(state.reviews.themes(window, Utc::now())?))
}

async fn list_users_handler(State(state): State<OpsState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.store.users()?))
}

async fn create_user_handler(
    State(state): State<OpsState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if user.name.trim().is_empty() || user.email.trim().is_empty() {
        return Err(AppError::InvalidInput("user name and email are required".to_string()));
    }
    let user = state.store.add_user(user)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_changes_handler(
    State(state): State<OpsState>,
    query: Result<Query<ChangesQuery>, QueryRejection>,
) -> Result<Json<Vec<Change>>, AppError> {
    let changes = if query_params(query)?.include_inactive {
        state.store.changes()?
    } else {
        state.store.active_changes()?
    };
    Ok(Json(changes))
}

async fn create_change_handler(
    State(state): State<OpsState>,
    Json(change): Json<NewChange>,
) -> Result<(StatusCode, Json<Change>), AppError> {
    if change.title.trim().is_empty() {
        return Err(AppError::InvalidInput("change title is required".to_string()));
    }
    let change = state.store.create_change(change, Utc::now())?;
    tracing::info!(change_id = %change.change_id, created_by = %change.created_by, "change posted");
    Ok((StatusCode::CREATED, Json(change)))
}

async fn deactivate_change_handler(
    State(state): State<OpsState>,
    Path(change_id): Path<String>,
) -> Result<Json<Change>, AppError> {
    let change = state.store.deactivate_change(&change_id)?;
    tracing::info!(change_id = %change.change_id, "change deactivated");
    Ok(Json(change))
}

async fn delete_change_handler(
    State(state): State<OpsState>,
    Path(change_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_change(&change_id)?;
    tracing::info!(%change_id, "change deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn acknowledge_handler(
    State(state): State<OpsState>,
    Path(change_id): Path<String>,
    Json(request): Json<AcknowledgeRequest>,
) -> Result<(StatusCode, Json<Acknowledgement>), AppError> {
    let ack = state
        .store
        .acknowledge(&change_id, &request.user_id, Utc::now())?;
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn list_acknowledgements_handler(
    State(state): State<OpsState>,
    Path(change_id): Path<String>,
) -> Result<Json<Vec<Acknowledgement>>, AppError> {
    Ok(Json(state.store.acknowledgements(&change_id)?))
}

async fn brief_handler(
    State(state): State<OpsState>,
    query: Result<Query<DaysQuery>, QueryRejection>,
) -> Result<Json<BriefView>, AppError> {
    let window = query_params(query)?.window(state.brief_window)?;
    let brief = state.briefs.today(window, Utc::now())?;
    Ok(Json(brief.view()))
}

async fn brief_export_handler(
    State(state): State<OpsState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let query = query_params(query)?;
    let window = DaysQuery { days: query.days }.window(state.brief_window)?;
    let brief = state.briefs.today(window, Utc::now())?;
    let document = query.format.renderer().render(&brief.view())?;

    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    let mut response = (StatusCode::OK, document.bytes).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&document.content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

async fn inject_data_handler(
    State(state): State<OpsState>,
) -> Result<Json<SeedSummary>, AppError> {
    state.store.clear()?;
    let summary = state.store.seed_demo(Utc::now())?;
    tracing::info!(
        menu = summary.menu_count,
        inventory = summary.inventory_count,
        reviews = summary.reviews_count,
        changes = summary.changes_count,
        users = summary.users_count,
        "demo data injected"
    );
    Ok(Json(summary))
}

async fn clear_data_handler(
    State(state): State<OpsState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.clear()?;
    tracing::info!("store cleared");
    Ok(Json(json!({ "status": "cleared" })))
}

async fn export_data_handler(
    State(state): State<OpsState>,
) -> Result<Json<StoreExport>, AppError> {
    Ok(Json(state.store.export()?))
}
