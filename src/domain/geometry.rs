// Geographic primitives

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Unweighted vertex centroid, used as the proxy query point for a region.
/// Callers guarantee at least one vertex; polygons always carry three or more.
pub fn centroid(vertices: &[LonLat]) -> LonLat {
    let count = vertices.len() as f64;
    let lon = vertices.iter().map(|v| v.lon).sum::<f64>() / count;
    let lat = vertices.iter().map(|v| v.lat).sum::<f64>() / count;
    LonLat::new(lon, lat)
}
