// Polygon domain model
use crate::domain::geometry::LonLat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_VERTICES: usize = 3;
pub const MAX_VERTICES: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum PolygonError {
    #[error("a polygon needs at least {MIN_VERTICES} vertices, got {0}")]
    TooFewVertices(usize),
    #[error("a polygon can have at most {MAX_VERTICES} vertices, got {0}")]
    TooManyVertices(usize),
}

/// A user-drawn closed region used as a query footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    pub id: String,
    pub name: String,
    /// Ring vertices; the first vertex implicitly closes the ring and is
    /// not duplicated at the end.
    pub vertices: Vec<LonLat>,
    pub data_source_id: String,
    pub color: String,
    pub current_value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Polygon {
    pub fn new(
        name: String,
        vertices: Vec<LonLat>,
        data_source_id: String,
        color: String,
    ) -> Result<Self, PolygonError> {
        if vertices.len() < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices(vertices.len()));
        }
        if vertices.len() > MAX_VERTICES {
            return Err(PolygonError::TooManyVertices(vertices.len()));
        }
        let now = Utc::now();
        Ok(Self {
            id: format!("polygon-{}", now.timestamp_millis()),
            name,
            vertices,
            data_source_id,
            color,
            current_value: None,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<LonLat> {
        vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_new_polygon_has_no_value_yet() {
        let polygon = Polygon::new(
            "Polygon 1".to_string(),
            square(),
            "open-meteo-temperature".to_string(),
            "#3b82f6".to_string(),
        )
        .unwrap();
        assert_eq!(polygon.current_value, None);
        assert!(polygon.id.starts_with("polygon-"));
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        let result = Polygon::new(
            "Polygon 1".to_string(),
            vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 0.0)],
            "ds".to_string(),
            "#3b82f6".to_string(),
        );
        assert_eq!(result.unwrap_err(), PolygonError::TooFewVertices(2));
    }

    #[test]
    fn test_rejects_too_many_vertices() {
        let vertices: Vec<LonLat> = (0..13).map(|i| LonLat::new(i as f64, 0.0)).collect();
        let result = Polygon::new(
            "Polygon 1".to_string(),
            vertices,
            "ds".to_string(),
            "#3b82f6".to_string(),
        );
        assert_eq!(result.unwrap_err(), PolygonError::TooManyVertices(13));
    }

    #[test]
    fn test_accepts_bounds() {
        let triangle: Vec<LonLat> = (0..3).map(|i| LonLat::new(i as f64, 0.0)).collect();
        assert!(Polygon::new("a".into(), triangle, "ds".into(), "#fff".into()).is_ok());

        let max: Vec<LonLat> = (0..12).map(|i| LonLat::new(i as f64, 0.0)).collect();
        assert!(Polygon::new("b".into(), max, "ds".into(), "#fff".into()).is_ok());
    }
}
