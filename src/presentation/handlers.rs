// HTTP request handlers
use crate::application::dashboard_store::DashboardEvent;
use crate::domain::data_source::ColorRule;
use crate::domain::geometry::LonLat;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolygonRequest {
    pub name: String,
    pub vertices: Vec<LonLat>,
    pub data_source_id: String,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateDataSourceRequest {
    pub name: String,
    pub field: Option<String>,
    #[serde(default)]
    pub rules: Vec<ColorRule>,
}

#[derive(Deserialize)]
pub struct UpdateDataSourceRequest {
    pub name: Option<String>,
    pub field: Option<String>,
    pub rules: Option<Vec<ColorRule>>,
}

#[derive(Deserialize)]
pub struct SelectDataSourceRequest {
    pub id: String,
}

#[derive(Deserialize)]
pub struct TimeWindowRequest {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub current: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct RangeModeRequest {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct DrawingModeRequest {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct MapViewRequest {
    pub center: Option<LonLat>,
    pub zoom: Option<u8>,
}

#[derive(Deserialize)]
pub struct SidebarRequest {
    pub open: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard state; the view layer renders from this.
pub async fn get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.state().await)
}

pub async fn create_polygon(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePolygonRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::AddPolygon {
            name: request.name,
            vertices: request.vertices,
            data_source_id: request.data_source_id,
            color: request.color,
        },
        StatusCode::CREATED,
    )
    .await
}

/// Finish the drawing flow, turning the accumulated points into a polygon.
pub async fn complete_drawing(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    apply(&state, DashboardEvent::CompleteDrawing, StatusCode::CREATED).await
}

pub async fn delete_polygon(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::RemovePolygon { id },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn create_data_source(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDataSourceRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::AddDataSource {
            name: request.name,
            field: request.field,
            rules: request.rules,
        },
        StatusCode::CREATED,
    )
    .await
}

pub async fn update_data_source(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateDataSourceRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::UpdateDataSource {
            id,
            name: request.name,
            field: request.field,
            rules: request.rules,
        },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn select_data_source(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectDataSourceRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::SelectDataSource { id: request.id },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn set_time_window(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimeWindowRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::SetTimeWindow {
            start: request.start,
            end: request.end,
            current: request.current,
        },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn set_range_mode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RangeModeRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::SetRangeMode {
            enabled: request.enabled,
        },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn set_drawing_mode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DrawingModeRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::SetDrawingMode {
            enabled: request.enabled,
        },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn add_drawing_point(
    State(state): State<Arc<AppState>>,
    Json(point): Json<LonLat>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::AddDrawingPoint { point },
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn clear_drawing_points(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::ClearDrawingPoints,
        StatusCode::NO_CONTENT,
    )
    .await
}

pub async fn set_map_view(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MapViewRequest>,
) -> impl IntoResponse {
    if let Some(center) = request.center {
        if let Err(e) = state.store.apply(DashboardEvent::SetMapCenter { center }).await {
            return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
        }
    }
    if let Some(zoom) = request.zoom {
        if let Err(e) = state.store.apply(DashboardEvent::SetMapZoom { zoom }).await {
            return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

pub async fn set_sidebar(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SidebarRequest>,
) -> impl IntoResponse {
    apply(
        &state,
        DashboardEvent::SetSidebarOpen { open: request.open },
        StatusCode::NO_CONTENT,
    )
    .await
}

async fn apply(
    state: &AppState,
    event: DashboardEvent,
    success: StatusCode,
) -> axum::response::Response {
    match state.store.apply(event).await {
        Ok(()) => success.into_response(),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    }
}
