// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use crate::application::aggregation_service::AggregationService;
use crate::application::dashboard_store::{DashboardStore, RefreshTrigger};
use crate::application::refresh_scheduler::RefreshScheduler;
use crate::application::refresh_service::RefreshService;
use crate::application::snapshot_store::SnapshotStore;
use crate::domain::dashboard::{DashboardState, MapView};
use crate::domain::geometry::LonLat;
use crate::infrastructure::config::{load_dashboard_config, load_provider_config};
use crate::infrastructure::file_snapshot_store::FileSnapshotStore;
use crate::infrastructure::open_meteo_repository::OpenMeteoRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_drawing_point, clear_drawing_points, complete_drawing, create_data_source, create_polygon,
    delete_polygon, get_state, health_check, select_data_source, set_drawing_mode, set_map_view,
    set_range_mode, set_sidebar, set_time_window, update_data_source,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let provider_config = load_provider_config()?;
    let dashboard_config = load_dashboard_config()?;

    // Seed state from the last snapshot, falling back to config defaults
    let snapshots = Arc::new(FileSnapshotStore::new(&dashboard_config.snapshot.path));
    let initial = match snapshots.load().await? {
        Some(snapshot) => DashboardState::restore(snapshot),
        None => {
            let map_view = MapView {
                center: LonLat::new(
                    dashboard_config.map.center_lon,
                    dashboard_config.map.center_lat,
                ),
                zoom: dashboard_config.map.zoom,
            };
            let sources = dashboard_config
                .sources
                .iter()
                .cloned()
                .map(|s| s.into_data_source())
                .collect();
            DashboardState::initial(map_view, sources)
        }
    };

    // Create store and services (application layer)
    let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
    let store = Arc::new(DashboardStore::new(initial, snapshots, trigger_tx.clone()));

    let repository = Arc::new(OpenMeteoRepository::new(
        provider_config.provider.base_url,
        Duration::from_secs(provider_config.provider.request_timeout_secs),
    ));
    let refresh_service = Arc::new(RefreshService::new(
        store.clone(),
        AggregationService::new(repository),
    ));

    // Drive refreshes from state changes, debouncing timeline drags
    let scheduler = RefreshScheduler::new(
        refresh_service,
        Duration::from_millis(dashboard_config.refresh.debounce_ms),
    );
    tokio::spawn(scheduler.run(trigger_rx));

    // Populate values for whatever the snapshot restored
    let _ = trigger_tx.send(RefreshTrigger::Immediate);

    // Create application state
    let state = Arc::new(AppState { store });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/state", get(get_state))
        .route("/polygons", post(create_polygon))
        .route("/polygons/complete", post(complete_drawing))
        .route("/polygons/:id", delete(delete_polygon))
        .route("/data-sources", post(create_data_source))
        .route("/data-sources/selected", put(select_data_source))
        .route("/data-sources/:id", put(update_data_source))
        .route("/time-window", put(set_time_window))
        .route("/range-mode", put(set_range_mode))
        .route("/drawing-mode", put(set_drawing_mode))
        .route(
            "/drawing-points",
            post(add_drawing_point).delete(clear_drawing_points),
        )
        .route("/map-view", put(set_map_view))
        .route("/sidebar", put(set_sidebar))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = dashboard_config.server.bind_addr.parse()?;
    println!("Starting polygon-weather service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
