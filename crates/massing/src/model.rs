use serde::{Deserialize, Serialize};

use crate::params::LotParameters;

/// Building face, in the order windows are laid out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Right,
    Back,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Front, Side::Right, Side::Back, Side::Left];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Right => "right",
            Side::Back => "back",
            Side::Left => "left",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub side: Side,
    /// Distance from the face center along the face, in length units.
    pub offset: f64,
    /// Edge length of the (square) window.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    /// 0-based, bottom to top.
    pub index: u32,
    pub side_length: f64,
    /// Height of the floor slot above the building base.
    pub vertical_offset: f64,
    pub windows: Vec<WindowSpec>,
}

impl FloorSpec {
    pub fn windows_on(&self, side: Side) -> impl Iterator<Item = &WindowSpec> + '_ {
        self.windows.iter().filter(move |w| w.side == side)
    }

    /// Windows on one face; every face of a floor carries the same count.
    pub fn windows_per_side(&self) -> usize {
        self.windows_on(Side::Front).count()
    }

    pub fn area(&self) -> f64 {
        self.side_length * self.side_length
    }
}

/// Output of one generation call. Never mutated; the next call produces a new
/// model that replaces this one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingModel {
    pub parameters: LotParameters,
    pub lot_side_length: f64,
    /// Side length of the ground floor.
    pub footprint_side_length: f64,
    /// Bottom to top.
    pub floors: Vec<FloorSpec>,
}

impl BuildingModel {
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn window_count(&self) -> usize {
        self.floors.iter().map(|f| f.windows.len()).sum()
    }

    /// Built floor area, after taper.
    pub fn gross_floor_area(&self) -> f64 {
        self.floors.iter().map(FloorSpec::area).sum()
    }

    /// Top of the highest floor slab above the building base.
    pub fn height(&self, floor_thickness: f64) -> f64 {
        self.floors
            .last()
            .map(|f| f.vertical_offset + floor_thickness)
            .unwrap_or(0.0)
    }
}
