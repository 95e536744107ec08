use foundation::math::GeoPoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest placeholder lot, square meters (inclusive).
pub const PLACEHOLDER_LOT_MIN_M2: u32 = 200;
/// Upper bound of placeholder lots, square meters (exclusive).
pub const PLACEHOLDER_LOT_MAX_M2: u32 = 2000;

/// Turns a resolved location into a lot area in square meters.
///
/// This is the seam where a parcel-data lookup would plug in; the massing
/// generator only ever sees the number.
pub trait LotEstimator {
    fn estimate_lot_area(&mut self, location: GeoPoint) -> f64;
}

/// Placeholder estimator: a whole number of square meters drawn uniformly from
/// `[200, 2000)`, ignoring the location.
#[derive(Debug, Clone)]
pub struct UniformLotEstimator<R = StdRng> {
    rng: R,
}

impl UniformLotEstimator<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of estimates.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> UniformLotEstimator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LotEstimator for UniformLotEstimator<R> {
    fn estimate_lot_area(&mut self, _location: GeoPoint) -> f64 {
        self.rng
            .gen_range(PLACEHOLDER_LOT_MIN_M2..PLACEHOLDER_LOT_MAX_M2) as f64
    }
}

/// Always returns the same area. Used for demos and tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedLotEstimator(pub f64);

impl LotEstimator for FixedLotEstimator {
    fn estimate_lot_area(&mut self, _location: GeoPoint) -> f64 {
        self.0
    }
}

impl<T: LotEstimator + ?Sized> LotEstimator for Box<T> {
    fn estimate_lot_area(&mut self, location: GeoPoint) -> f64 {
        (**self).estimate_lot_area(location)
    }
}
