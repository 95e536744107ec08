use geocoding::{AddressForm, Candidate};
use massing::{BuildingInputs, BuildingModel, FLOOR_THICKNESS};
use serde::Serialize;

use crate::map_view::MapView;
use crate::notice::Notice;
use crate::step::Step;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub floor_count: usize,
    pub window_count: usize,
    pub lot_side_length: f64,
    pub footprint_side_length: f64,
    pub gross_floor_area: f64,
    pub height: f64,
}

impl ModelSummary {
    pub fn of(model: &BuildingModel) -> Self {
        Self {
            floor_count: model.floor_count(),
            window_count: model.window_count(),
            lot_side_length: model.lot_side_length,
            footprint_side_length: model.footprint_side_length,
            gross_floor_area: model.gross_floor_area(),
            height: model.height(FLOOR_THICKNESS),
        }
    }
}

/// Everything a front-end needs to render the wizard, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardView {
    pub step: Step,
    pub step_number: u8,
    pub step_label: String,
    pub progress_percent: u8,
    pub form: AddressForm,
    pub candidates: Vec<Candidate>,
    pub selected: Option<usize>,
    pub lot_area_m2: Option<f64>,
    pub can_proceed: bool,
    pub map: Option<MapView>,
    pub inputs: BuildingInputs,
    pub searching: bool,
    pub busy: bool,
    pub notice: Option<Notice>,
    pub model: Option<ModelSummary>,
}
