// Dashboard state model
use super::data_source::DataSource;
use super::geometry::LonLat;
use super::polygon::Polygon;
use super::time_window::TimeWindow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LonLat,
    pub zoom: u8,
}

/// The whole dashboard state, owned by the store and mutated only through
/// its named operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub time_window: TimeWindow,
    pub range_mode: bool,
    pub polygons: Vec<Polygon>,
    pub drawing_mode: bool,
    pub drawing_points: Vec<LonLat>,
    pub data_sources: Vec<DataSource>,
    pub selected_data_source_id: String,
    pub map_view: MapView,
    pub sidebar_open: bool,
    pub loading: bool,
}

impl DashboardState {
    pub fn initial(map_view: MapView, data_sources: Vec<DataSource>) -> Self {
        let selected_data_source_id = data_sources
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_default();
        Self {
            time_window: TimeWindow::default(),
            range_mode: false,
            polygons: Vec::new(),
            drawing_mode: false,
            drawing_points: Vec::new(),
            data_sources,
            selected_data_source_id,
            map_view,
            sidebar_open: true,
            loading: false,
        }
    }

    /// Rebuild state from a persisted snapshot. The time window, drawing
    /// state and loading flag are not persisted and come back at their
    /// defaults.
    pub fn restore(snapshot: DashboardSnapshot) -> Self {
        let mut state = Self::initial(snapshot.map_view, snapshot.data_sources);
        state.polygons = snapshot.polygons;
        state.sidebar_open = snapshot.sidebar_open;
        state
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            polygons: self.polygons.clone(),
            data_sources: self.data_sources.clone(),
            map_view: self.map_view,
            sidebar_open: self.sidebar_open,
        }
    }

    pub fn data_source(&self, id: &str) -> Option<&DataSource> {
        self.data_sources.iter().find(|s| s.id == id)
    }

    pub fn polygon_mut(&mut self, id: &str) -> Option<&mut Polygon> {
        self.polygons.iter_mut().find(|p| p.id == id)
    }
}

/// The subset of the state that survives a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub polygons: Vec<Polygon>,
    pub data_sources: Vec<DataSource>,
    pub map_view: MapView,
    pub sidebar_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::data_source::{ColorRule, RuleOperator};
    use chrono::Utc;

    fn source() -> DataSource {
        DataSource {
            id: "open-meteo-temperature".to_string(),
            name: "Temperature (°C)".to_string(),
            field: "temperature_2m".to_string(),
            rules: vec![ColorRule {
                operator: RuleOperator::Less,
                threshold: 10.0,
                color: "#3b82f6".to_string(),
                label: "Cold".to_string(),
            }],
        }
    }

    fn berlin() -> MapView {
        MapView {
            center: LonLat::new(13.41, 52.52),
            zoom: 10,
        }
    }

    #[test]
    fn test_initial_selects_first_source() {
        let state = DashboardState::initial(berlin(), vec![source()]);
        assert_eq!(state.selected_data_source_id, "open-meteo-temperature");
        assert!(!state.loading);
        assert!(state.sidebar_open);
    }

    #[test]
    fn test_snapshot_excludes_transient_state() {
        let mut state = DashboardState::initial(berlin(), vec![source()]);
        state.drawing_mode = true;
        state.drawing_points.push(LonLat::new(1.0, 1.0));
        state.loading = true;

        let json = serde_json::to_value(state.snapshot()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["dataSources", "mapView", "polygons", "sidebarOpen"]
        );
    }

    #[test]
    fn test_restore_resets_time_window_and_drawing() {
        let mut state = DashboardState::initial(berlin(), vec![source()]);
        state.polygons.push(
            Polygon::new(
                "Polygon 1".to_string(),
                vec![
                    LonLat::new(0.0, 0.0),
                    LonLat::new(1.0, 0.0),
                    LonLat::new(1.0, 1.0),
                ],
                "open-meteo-temperature".to_string(),
                "#3b82f6".to_string(),
            )
            .unwrap(),
        );
        state.sidebar_open = false;

        let restored = DashboardState::restore(state.snapshot());
        assert_eq!(restored.polygons.len(), 1);
        assert!(!restored.sidebar_open);
        assert!(!restored.drawing_mode);
        assert!(restored.drawing_points.is_empty());
        // The restored window is centered on "now", not on anything saved.
        assert!(restored.time_window.start <= Utc::now());
        assert!(restored.time_window.end >= Utc::now());
    }
}
