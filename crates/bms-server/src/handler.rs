use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use bms_store::{ItemStore, StoreError};
use bms_types::{CollectionKind, Item, ItemId, ItemPatch, NewItem, Principal};

use crate::auth::AdminSession;
use crate::config::AppSettings;
use crate::error::ServerResult;
use crate::state::AppState;
use crate::validation;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    let settings = state.settings()?;
    Ok(Json(json!({
        "name": "bms-server",
        "version": env!("CARGO_PKG_VERSION"),
        "app_name": settings.app_name,
    })))
}

// ---- session ----

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub identifier: String,
    #[serde(alias = "password")]
    pub secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub principal: Principal,
    pub issued_at: DateTime<Utc>,
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    let session = state
        .guard
        .authenticate(&request.identifier, &request.secret)
        .await?;
    Ok(Json(LoginResponse {
        token: session.credential.as_str().to_string(),
        principal: session.principal,
        issued_at: session.issued_at,
    }))
}

pub async fn whoami_handler(AdminSession(session): AdminSession) -> Json<serde_json::Value> {
    Json(json!({
        "principal": session.principal,
        "issued_at": session.issued_at,
    }))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> ServerResult<StatusCode> {
    state.guard.end_session()?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- public ----

/// Active onboarding sections, in display order.
pub async fn onboard_handler(State(state): State<AppState>) -> ServerResult<Json<Vec<Item>>> {
    Ok(Json(state.collections.sections().list_active()?))
}

// ---- admin ----

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_posts: usize,
    pub total_sections: usize,
    pub active_sections: usize,
    pub posts_this_week: usize,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> ServerResult<Json<DashboardSummary>> {
    let posts = state.collections.posts().list()?;
    let sections = state.collections.sections().list()?;
    let week_ago = Utc::now() - Duration::days(7);
    Ok(Json(DashboardSummary {
        total_posts: posts.len(),
        total_sections: sections.len(),
        active_sections: sections.iter().filter(|s| s.active).count(),
        posts_this_week: posts.iter().filter(|p| p.created_at >= week_ago).count(),
    }))
}

pub async fn list_items_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<CollectionKind>,
    _admin: AdminSession,
) -> ServerResult<Json<Vec<Item>>> {
    Ok(Json(state.collections.get(kind).list()?))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<CollectionKind>,
    _admin: AdminSession,
    Json(mut item): Json<NewItem>,
) -> ServerResult<(StatusCode, Json<Item>)> {
    validation::prepare_new(kind, &mut item)?;
    let created = state.collections.get(kind).add(item.fields, item.active)?;
    tracing::info!(collection = %kind, id = %created.id, "item created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<CollectionKind>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> ServerResult<Json<Item>> {
    let id = ItemId::from(id);
    let item = state
        .collections
        .get(kind)
        .get(&id)?
        .ok_or_else(|| StoreError::not_found(&id))?;
    Ok(Json(item))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<CollectionKind>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(patch): Json<ItemPatch>,
) -> ServerResult<Json<Item>> {
    validation::check_patch(kind, &patch)?;
    let updated = state.collections.get(kind).update(&ItemId::from(id), &patch)?;
    Ok(Json(updated))
}

pub async fn delete_item_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<CollectionKind>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let id = ItemId::from(id);
    state.collections.get(kind).remove(&id)?;
    tracing::info!(collection = %kind, %id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub position: usize,
}

/// Move an item and return the collection in its new order.
pub async fn move_item_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<CollectionKind>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> ServerResult<Json<Vec<Item>>> {
    let store = state.collections.get(kind);
    store.reorder(&ItemId::from(id), request.position)?;
    Ok(Json(store.list()?))
}

pub async fn get_settings_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> ServerResult<Json<AppSettings>> {
    Ok(Json(state.settings()?))
}

pub async fn put_settings_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(settings): Json<AppSettings>,
) -> ServerResult<Json<AppSettings>> {
    Ok(Json(state.replace_settings(settings)?))
}
