// Refresh service - Recompute every polygon's value and color
use crate::application::aggregation_service::AggregationService;
use crate::application::dashboard_store::DashboardStore;
use crate::domain::dashboard::DashboardState;
use crate::domain::data_source::classify;
use crate::domain::polygon::Polygon;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct RefreshService {
    store: Arc<DashboardStore>,
    aggregation: AggregationService,
    /// Monotonic batch counter. Writes from a superseded batch are
    /// discarded so a slow older fetch cannot overwrite newer results.
    generation: AtomicU64,
}

impl RefreshService {
    pub fn new(store: Arc<DashboardStore>, aggregation: AggregationService) -> Self {
        Self {
            store,
            aggregation,
            generation: AtomicU64::new(0),
        }
    }

    /// One full refresh batch. Every polygon refreshes independently and
    /// concurrently; a failed polygon keeps its previous value and color,
    /// and never aborts its siblings. The loading flag covers the whole
    /// batch regardless of individual outcomes.
    pub async fn refresh_all(&self) {
        let state = self.store.state().await;
        if state.polygons.is_empty() {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (start, end) = state.time_window.query_bounds(state.range_mode);

        self.store.set_loading(true).await;
        let tasks = state
            .polygons
            .iter()
            .map(|polygon| self.refresh_polygon(polygon, &state, start, end, generation));
        join_all(tasks).await;
        self.store.set_loading(false).await;
    }

    async fn refresh_polygon(
        &self,
        polygon: &Polygon,
        state: &DashboardState,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        generation: u64,
    ) {
        let Some(source) = state.data_source(&polygon.data_source_id) else {
            // Dangling reference; leave the polygon untouched.
            return;
        };

        match self
            .aggregation
            .aggregate(&polygon.vertices, start, end, &source.field)
            .await
        {
            Ok(value) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!("discarding superseded refresh for polygon {}", polygon.id);
                    return;
                }
                let color = classify(value, &source.rules);
                self.store.update_polygon_value(&polygon.id, value).await;
                self.store.update_polygon_color(&polygon.id, color).await;
            }
            Err(e) => {
                tracing::warn!("refresh failed for polygon {}: {:#}", polygon.id, e);
            }
        }
    }
}
