use crate::model::{BuildingModel, FloorSpec, Side, WindowSpec};
use crate::params::LotParameters;

/// Vertical distance between consecutive floor slots.
pub const FLOOR_SPACING: f64 = 4.0;
/// Slab thickness; the slab is centered in its slot.
pub const FLOOR_THICKNESS: f64 = 2.0;
/// Side-length reduction per floor, as a fraction of the base side.
pub const TAPER_PER_FLOOR: f64 = 0.05;
/// Lower bound of the taper factor. Floors from index 20 up would otherwise
/// reach a zero or negative side; they keep the size of floor 19 instead.
pub const MIN_TAPER_FACTOR: f64 = 0.05;
pub const WINDOW_SPACING: f64 = 3.0;
pub const WINDOW_SIZE: f64 = 1.0;

/// Taper factor applied to the base side length of floor `index`.
pub fn taper_factor(index: u32) -> f64 {
    (1.0 - TAPER_PER_FLOOR * index as f64).max(MIN_TAPER_FACTOR)
}

/// Side length of every floor before taper: `sqrt(lot * far / floors)`.
pub fn base_side_length(lot: &LotParameters) -> f64 {
    let total_floor_area = lot.lot_area_m2() * lot.floor_area_ratio();
    let per_floor_area = total_floor_area / lot.floor_count() as f64;
    per_floor_area.sqrt()
}

pub fn windows_per_side(side_length: f64) -> usize {
    (side_length / WINDOW_SPACING).floor().max(0.0) as usize
}

/// Offsets of a row of `count` windows, centered on the face.
pub fn window_offsets(count: usize) -> impl Iterator<Item = f64> {
    let start = -((count.saturating_sub(1)) as f64) * WINDOW_SPACING * 0.5;
    (0..count).map(move |i| start + i as f64 * WINDOW_SPACING)
}

fn place_windows(side_length: f64) -> Vec<WindowSpec> {
    let count = windows_per_side(side_length);
    let mut windows = Vec::with_capacity(count * Side::ALL.len());
    for side in Side::ALL {
        windows.extend(window_offsets(count).map(|offset| WindowSpec {
            side,
            offset,
            size: WINDOW_SIZE,
        }));
    }
    windows
}

/// Builds the massing model for `lot`.
///
/// Pure and deterministic: equal inputs give equal models, and nothing is
/// remembered between calls.
pub fn generate(lot: &LotParameters) -> BuildingModel {
    let base = base_side_length(lot);

    let floors = (0..lot.floor_count())
        .map(|index| {
            let side_length = base * taper_factor(index);
            FloorSpec {
                index,
                side_length,
                vertical_offset: index as f64 * FLOOR_SPACING,
                windows: place_windows(side_length),
            }
        })
        .collect();

    BuildingModel {
        parameters: *lot,
        lot_side_length: lot.lot_area_m2().sqrt(),
        footprint_side_length: base,
        floors,
    }
}
