use serde::{Deserialize, Serialize};

/// Fallback camera center used when the catalog is empty: central Aarhus.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 56.1629,
    lon: 10.2039,
};

/// Zoom paired with [`DEFAULT_CENTER`] before any bounds fit has run.
pub const DEFAULT_ZOOM: f64 = 13.0;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LatLngBounds {
    /// Bounding box over a set of points. `None` for an empty set.
    pub fn of(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        for p in &points[1..] {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lon = self.min_lon.min(p.lon);
        self.max_lon = self.max_lon.max(p.lon);
    }

    pub fn contains(&self, p: &LatLng) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lon >= self.min_lon
            && p.lon <= self.max_lon
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// Arithmetic mean of the points' latitudes and longitudes.
/// `None` for an empty set (callers fall back to [`DEFAULT_CENTER`]).
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(la, lo), p| (la + p.lat, lo + p.lon));
    Some(LatLng::new(lat_sum / n, lon_sum / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harbor_cluster() -> Vec<LatLng> {
        vec![
            LatLng::new(56.1576, 10.2082),
            LatLng::new(56.1588, 10.2155),
            LatLng::new(56.1580, 10.2086),
            LatLng::new(56.1561, 10.2004),
        ]
    }

    #[test]
    fn test_centroid_is_per_axis_mean() {
        let c = centroid(&harbor_cluster()).unwrap();
        assert!((c.lat - 56.157625).abs() < 1e-9);
        assert!((c.lon - 10.208175).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_single_point() {
        let p = LatLng::new(56.0, 10.0);
        let c = centroid(&[p]).unwrap();
        assert!((c.lat - p.lat).abs() < 1e-12);
        assert!((c.lon - p.lon).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_empty_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_bounds_spans() {
        let b = LatLngBounds::of(&harbor_cluster()).unwrap();
        assert!((b.min_lat - 56.1561).abs() < 1e-9);
        assert!((b.max_lat - 56.1588).abs() < 1e-9);
        assert!((b.min_lon - 10.2004).abs() < 1e-9);
        assert!((b.max_lon - 10.2155).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_contains_every_input_point() {
        let points = harbor_cluster();
        let b = LatLngBounds::of(&points).unwrap();
        for p in &points {
            assert!(b.contains(p), "bounds must contain {:?}", p);
        }
    }

    #[test]
    fn test_bounds_edges_are_inclusive() {
        let b = LatLngBounds::of(&harbor_cluster()).unwrap();
        assert!(b.contains(&LatLng::new(b.min_lat, b.min_lon)));
        assert!(b.contains(&LatLng::new(b.max_lat, b.max_lon)));
    }

    #[test]
    fn test_bounds_excludes_outside_point() {
        let b = LatLngBounds::of(&harbor_cluster()).unwrap();
        assert!(!b.contains(&LatLng::new(56.20, 10.21)));
        assert!(!b.contains(&LatLng::new(56.157, 10.30)));
    }

    #[test]
    fn test_bounds_of_empty_is_none() {
        assert!(LatLngBounds::of(&[]).is_none());
    }

    #[test]
    fn test_bounds_of_single_point_is_degenerate() {
        let p = LatLng::new(56.15, 10.20);
        let b = LatLngBounds::of(&[p]).unwrap();
        assert!((b.lat_span()).abs() < 1e-12);
        assert!((b.lon_span()).abs() < 1e-12);
        assert!(b.contains(&p));
    }

    #[test]
    fn test_bounds_center_is_box_midpoint() {
        let b = LatLngBounds::of(&harbor_cluster()).unwrap();
        let c = b.center();
        assert!((c.lat - (56.1561 + 56.1588) / 2.0).abs() < 1e-9);
        assert!((c.lon - (10.2004 + 10.2155) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_extend_grows_box() {
        let mut b = LatLngBounds::of(&[LatLng::new(56.15, 10.20)]).unwrap();
        b.extend(LatLng::new(56.17, 10.18));
        assert!(b.contains(&LatLng::new(56.16, 10.19)));
        assert!((b.max_lat - 56.17).abs() < 1e-12);
        assert!((b.min_lon - 10.18).abs() < 1e-12);
    }
}
