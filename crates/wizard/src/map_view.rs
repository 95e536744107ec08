use foundation::math::{GeoBounds, GeoPoint};
use geocoding::Candidate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// 1-based label drawn on the pin.
    pub label: String,
    pub candidate_index: usize,
    pub position: GeoPoint,
}

/// What the external map widget should show for a candidate list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub bounds: GeoBounds,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Centered on the first candidate; `None` for an empty list.
    pub fn for_candidates(candidates: &[Candidate], zoom: u8) -> Option<Self> {
        let first = candidates.first()?;
        let bounds = GeoBounds::from_points(candidates.iter().map(|c| c.location))?;
        let markers = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| Marker {
                label: (i + 1).to_string(),
                candidate_index: i,
                position: c.location,
            })
            .collect();
        Some(Self {
            center: first.location,
            zoom,
            bounds,
            markers,
        })
    }

    pub fn marker(&self, label: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.label == label)
    }
}
