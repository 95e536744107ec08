use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Latitude in [-90, 90], longitude in [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.lat_deg.is_finite()
            && self.lon_deg.is_finite()
            && (-90.0..=90.0).contains(&self.lat_deg)
            && (-180.0..=180.0).contains(&self.lon_deg)
    }

    /// Great-circle distance on a sphere of radius [`WGS84_A`] (haversine).
    pub fn distance_m(&self, other: GeoPoint) -> f64 {
        let lat1 = self.lat_deg.to_radians();
        let lat2 = other.lat_deg.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.lon_deg - self.lon_deg).to_radians();

        let h = (dlat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon * 0.5).sin().powi(2);
        2.0 * WGS84_A * h.sqrt().min(1.0).asin()
    }
}

/// Lat/lon rectangle; does not handle antimeridian wrap.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut sw = first;
        let mut ne = first;
        for p in iter {
            sw.lat_deg = sw.lat_deg.min(p.lat_deg);
            sw.lon_deg = sw.lon_deg.min(p.lon_deg);
            ne.lat_deg = ne.lat_deg.max(p.lat_deg);
            ne.lon_deg = ne.lon_deg.max(p.lon_deg);
        }
        Some(Self {
            south_west: sw,
            north_east: ne,
        })
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat_deg + self.north_east.lat_deg) * 0.5,
            (self.south_west.lon_deg + self.north_east.lon_deg) * 0.5,
        )
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat_deg >= self.south_west.lat_deg
            && p.lat_deg <= self.north_east.lat_deg
            && p.lon_deg >= self.south_west.lon_deg
            && p.lon_deg <= self.north_east.lon_deg
    }
}
