// Dashboard store - Single coordinator for shared dashboard state
use crate::application::snapshot_store::SnapshotStore;
use crate::domain::dashboard::{DashboardSnapshot, DashboardState};
use crate::domain::data_source::{ColorRule, DEFAULT_FIELD, DataSource};
use crate::domain::geometry::LonLat;
use crate::domain::polygon::{MAX_VERTICES, Polygon};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};

/// Initial fill color for polygons created without an explicit one.
const FALLBACK_POLYGON_COLOR: &str = "#3b82f6";

/// How an applied event schedules the next refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Structural change: refresh right away.
    Immediate,
    /// Current-pointer move: collapse rapid changes, fire only the last.
    Debounced,
}

/// Typed state mutations. The view layer emits these; `apply` is the single
/// dispatcher that applies them, serialized by the store's lock.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    AddPolygon {
        name: String,
        vertices: Vec<LonLat>,
        data_source_id: String,
        color: Option<String>,
    },
    /// Finish the drawing flow: build a polygon from the accumulated
    /// points against the selected data source.
    CompleteDrawing,
    RemovePolygon {
        id: String,
    },
    AddDataSource {
        name: String,
        field: Option<String>,
        rules: Vec<ColorRule>,
    },
    UpdateDataSource {
        id: String,
        name: Option<String>,
        field: Option<String>,
        rules: Option<Vec<ColorRule>>,
    },
    SelectDataSource {
        id: String,
    },
    SetTimeWindow {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        current: Option<DateTime<Utc>>,
    },
    SetRangeMode {
        enabled: bool,
    },
    SetDrawingMode {
        enabled: bool,
    },
    AddDrawingPoint {
        point: LonLat,
    },
    ClearDrawingPoints,
    SetMapCenter {
        center: LonLat,
    },
    SetMapZoom {
        zoom: u8,
    },
    SetSidebarOpen {
        open: bool,
    },
}

pub struct DashboardStore {
    state: RwLock<DashboardState>,
    snapshots: Arc<dyn SnapshotStore>,
    triggers: mpsc::UnboundedSender<RefreshTrigger>,
}

impl DashboardStore {
    pub fn new(
        initial: DashboardState,
        snapshots: Arc<dyn SnapshotStore>,
        triggers: mpsc::UnboundedSender<RefreshTrigger>,
    ) -> Self {
        Self {
            state: RwLock::new(initial),
            snapshots,
            triggers,
        }
    }

    /// Cloned snapshot of the current state for readers.
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Apply one event: mutate state under the lock, persist the durable
    /// subset when it changed, and notify the refresh scheduler.
    pub async fn apply(&self, event: DashboardEvent) -> anyhow::Result<()> {
        let (trigger, snapshot) = {
            let mut state = self.state.write().await;
            let (trigger, persist) = apply_event(&mut state, event)?;
            let snapshot = persist.then(|| state.snapshot());
            (trigger, snapshot)
        };

        if let Some(snapshot) = snapshot {
            self.persist(&snapshot).await;
        }
        if let Some(trigger) = trigger {
            let _ = self.triggers.send(trigger);
        }
        Ok(())
    }

    /// Orchestrator-only writer: the refreshed representative value.
    pub async fn update_polygon_value(&self, id: &str, value: f64) {
        let snapshot = {
            let mut state = self.state.write().await;
            match state.polygon_mut(id) {
                Some(polygon) => {
                    polygon.current_value = Some(value);
                    Some(state.snapshot())
                }
                None => None,
            }
        };
        if let Some(snapshot) = snapshot {
            self.persist(&snapshot).await;
        }
    }

    /// Orchestrator-only writer: the classified display color.
    pub async fn update_polygon_color(&self, id: &str, color: String) {
        let snapshot = {
            let mut state = self.state.write().await;
            match state.polygon_mut(id) {
                Some(polygon) => {
                    polygon.color = color;
                    Some(state.snapshot())
                }
                None => None,
            }
        };
        if let Some(snapshot) = snapshot {
            self.persist(&snapshot).await;
        }
    }

    /// Batch-wide loading indicator; not persisted.
    pub async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    async fn persist(&self, snapshot: &DashboardSnapshot) {
        if let Err(e) = self.snapshots.save(snapshot).await {
            tracing::warn!("failed to persist dashboard snapshot: {:#}", e);
        }
    }
}

/// Returns the refresh trigger the event warrants and whether the persisted
/// subset changed.
fn apply_event(
    state: &mut DashboardState,
    event: DashboardEvent,
) -> anyhow::Result<(Option<RefreshTrigger>, bool)> {
    match event {
        DashboardEvent::AddPolygon {
            name,
            vertices,
            data_source_id,
            color,
        } => {
            let color = color.unwrap_or_else(|| FALLBACK_POLYGON_COLOR.to_string());
            let polygon = Polygon::new(name, vertices, data_source_id, color)?;
            state.polygons.push(polygon);
            Ok((Some(RefreshTrigger::Immediate), true))
        }
        DashboardEvent::CompleteDrawing => {
            let Some(source) = state.data_source(&state.selected_data_source_id).cloned() else {
                // No selected source; leave the drawing in progress.
                return Ok((None, false));
            };
            let name = format!("Polygon {}", state.polygons.len() + 1);
            let color = source
                .rules
                .first()
                .map(|r| r.color.clone())
                .unwrap_or_else(|| FALLBACK_POLYGON_COLOR.to_string());
            let polygon = Polygon::new(name, state.drawing_points.clone(), source.id, color)?;
            state.polygons.push(polygon);
            state.drawing_points.clear();
            state.drawing_mode = false;
            Ok((Some(RefreshTrigger::Immediate), true))
        }
        DashboardEvent::RemovePolygon { id } => {
            let before = state.polygons.len();
            state.polygons.retain(|p| p.id != id);
            if state.polygons.len() == before {
                return Ok((None, false));
            }
            Ok((Some(RefreshTrigger::Immediate), true))
        }
        DashboardEvent::AddDataSource { name, field, rules } => {
            state.data_sources.push(DataSource {
                id: format!("datasource-{}", Utc::now().timestamp_millis()),
                name,
                field: field.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
                rules,
            });
            Ok((Some(RefreshTrigger::Immediate), true))
        }
        DashboardEvent::UpdateDataSource {
            id,
            name,
            field,
            rules,
        } => {
            let Some(source) = state.data_sources.iter_mut().find(|s| s.id == id) else {
                return Ok((None, false));
            };
            if let Some(name) = name {
                source.name = name;
            }
            if let Some(field) = field {
                source.field = field;
            }
            if let Some(rules) = rules {
                source.rules = rules;
            }
            Ok((Some(RefreshTrigger::Immediate), true))
        }
        DashboardEvent::SelectDataSource { id } => {
            state.selected_data_source_id = id;
            Ok((None, false))
        }
        DashboardEvent::SetTimeWindow {
            start,
            end,
            current,
        } => {
            let structural = start.is_some() || end.is_some();
            if let Some(start) = start {
                state.time_window.start = start;
            }
            if let Some(end) = end {
                state.time_window.end = end;
            }
            if let Some(current) = current {
                state.time_window.current = current;
            }
            let trigger = if structural {
                RefreshTrigger::Immediate
            } else {
                RefreshTrigger::Debounced
            };
            Ok((Some(trigger), false))
        }
        DashboardEvent::SetRangeMode { enabled } => {
            state.range_mode = enabled;
            Ok((Some(RefreshTrigger::Immediate), false))
        }
        DashboardEvent::SetDrawingMode { enabled } => {
            state.drawing_mode = enabled;
            if enabled {
                state.drawing_points.clear();
            }
            Ok((None, false))
        }
        DashboardEvent::AddDrawingPoint { point } => {
            if state.drawing_points.len() >= MAX_VERTICES {
                tracing::debug!("ignoring drawing point beyond the {} cap", MAX_VERTICES);
                return Ok((None, false));
            }
            state.drawing_points.push(point);
            Ok((None, false))
        }
        DashboardEvent::ClearDrawingPoints => {
            state.drawing_points.clear();
            Ok((None, false))
        }
        DashboardEvent::SetMapCenter { center } => {
            state.map_view.center = center;
            Ok((None, true))
        }
        DashboardEvent::SetMapZoom { zoom } => {
            state.map_view.zoom = zoom;
            Ok((None, true))
        }
        DashboardEvent::SetSidebarOpen { open } => {
            state.sidebar_open = open;
            Ok((None, true))
        }
    }
}
