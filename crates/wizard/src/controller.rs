use std::future::Future;

use geocoding::{AddressForm, Candidate, LocationResolver, ResolveError};
use massing::{
    BuildingInputs, BuildingModel, LotEstimator, LotParameters, UniformLotEstimator, generate,
};
use runtime::EventBus;
use scene::{SceneError, SceneHost, Viewport, WorldSceneHost};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::WizardConfig;
use crate::error::WizardError;
use crate::map_view::MapView;
use crate::notice::Notice;
use crate::step::Step;
use crate::view::{ModelSummary, WizardView};

/// Number of trace events a controller keeps; older ones are dropped.
pub const EVENT_LOG_LIMIT: usize = 256;

/// The candidate the user picked, with its estimated lot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub index: usize,
    pub candidate: Candidate,
    pub lot_area_m2: f64,
}

/// An address lookup between [`WizardController::begin_address_search`] and
/// [`WizardController::finish_address_search`].
#[derive(Debug)]
#[must_use]
pub struct PendingSearch {
    query: String,
    session: u64,
}

impl PendingSearch {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// A validated parameter change waiting for
/// [`WizardController::finish_parameter_update`].
#[derive(Debug)]
#[must_use]
pub struct PendingUpdate {
    parameters: LotParameters,
    inputs: BuildingInputs,
    session: u64,
}

impl PendingUpdate {
    pub fn inputs(&self) -> BuildingInputs {
        self.inputs
    }

    pub fn parameters(&self) -> &LotParameters {
        &self.parameters
    }
}

/// Three-step state machine: address entry, candidate selection, model view.
///
/// The two slow operations (address lookup, regeneration after the busy
/// pause) are split into `begin_*` / `finish_*` so owners that cannot hold
/// `&mut self` across an await (a `RefCell` in the browser) can drive them.
/// A completion that arrives after `back` or `reset` is rejected as
/// [`WizardError::Stale`].
#[derive(Debug)]
pub struct WizardController<H = WorldSceneHost, E = UniformLotEstimator> {
    config: WizardConfig,
    host: H,
    estimator: E,
    viewport: Viewport,

    step: Step,
    form: AddressForm,
    candidates: Vec<Candidate>,
    map: Option<MapView>,
    selection: Option<Selection>,
    inputs: BuildingInputs,
    model: Option<BuildingModel>,

    searching: bool,
    updating: bool,
    // Bumped whenever in-flight work must be invalidated.
    session: u64,
    notice: Option<Notice>,
    events: EventBus,
}

impl<H: SceneHost, E: LotEstimator> WizardController<H, E> {
    pub fn new(config: WizardConfig, host: H, estimator: E) -> Self {
        let inputs = config.default_inputs;
        let mut events = EventBus::with_limit(EVENT_LOG_LIMIT);
        events.emit("step", Step::AddressEntry.as_str());
        Self {
            config,
            host,
            estimator,
            viewport: Viewport::default(),
            step: Step::AddressEntry,
            form: AddressForm::default(),
            candidates: Vec::new(),
            map: None,
            selection: None,
            inputs,
            model: None,
            searching: false,
            updating: false,
            session: 0,
            notice: None,
            events,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &AddressForm {
        &self.form
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn map_view(&self) -> Option<&MapView> {
        self.map.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Inputs of the displayed model, or the defaults before the first one.
    pub fn inputs(&self) -> BuildingInputs {
        self.inputs
    }

    pub fn model(&self) -> Option<&BuildingModel> {
        self.model.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// True while a parameter update is between its two phases.
    pub fn is_busy(&self) -> bool {
        self.updating
    }

    pub fn can_proceed(&self) -> bool {
        self.step == Step::AddressSelection && self.selection.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records the viewport used at the next initialization and forwards it
    /// to a live host. Empty or non-finite sizes (a hidden canvas) are
    /// rejected and the previous viewport stays in effect.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), WizardError> {
        if !viewport.is_valid() {
            return Err(self.reject(WizardError::Scene(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            })));
        }
        if self.host.is_initialized() {
            if let Err(e) = self.host.resize(viewport) {
                return Err(self.reject(e.into()));
            }
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            step: self.step,
            step_number: self.step.number(),
            step_label: self.step.label(),
            progress_percent: self.step.progress_percent(),
            form: self.form.clone(),
            candidates: self.candidates.clone(),
            selected: self.selection.as_ref().map(|s| s.index),
            lot_area_m2: self.selection.as_ref().map(|s| s.lot_area_m2),
            can_proceed: self.can_proceed(),
            map: self.map.clone(),
            inputs: self.inputs,
            searching: self.searching,
            busy: self.updating,
            notice: self.notice.clone(),
            model: self.model.as_ref().map(ModelSummary::of),
        }
    }

    // ---- Step 1: address entry ----

    pub fn begin_address_search(&mut self, form: AddressForm) -> Result<PendingSearch, WizardError> {
        self.require_step(Step::AddressEntry, "search for an address")?;
        if self.searching {
            return Err(self.reject(WizardError::Busy));
        }
        if form.is_blank() {
            return Err(self.reject(WizardError::EmptyAddress));
        }

        let query = form.query();
        self.form = form;
        self.searching = true;
        self.notice = None;
        self.events.emit("search", query.clone());
        info!(query = %query, "address search started");
        Ok(PendingSearch {
            query,
            session: self.session,
        })
    }

    pub fn finish_address_search(
        &mut self,
        pending: PendingSearch,
        result: Result<Vec<Candidate>, ResolveError>,
    ) -> Result<&[Candidate], WizardError> {
        if pending.session != self.session || !self.searching || self.step != Step::AddressEntry {
            return Err(self.reject(WizardError::Stale));
        }
        self.searching = false;

        let candidates = match result {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => return Err(self.reject(WizardError::ResolverEmpty)),
            Err(e) => return Err(self.reject(e.into())),
        };

        info!(query = %pending.query, count = candidates.len(), "address search finished");
        self.map = MapView::for_candidates(&candidates, self.config.map_zoom);
        self.candidates = candidates;
        self.selection = None;
        self.enter(Step::AddressSelection);
        Ok(&self.candidates)
    }

    /// Runs both search phases. Holds `&mut self` across the lookup.
    pub async fn submit_address<R: LocationResolver + ?Sized>(
        &mut self,
        form: AddressForm,
        resolver: &R,
    ) -> Result<&[Candidate], WizardError> {
        let pending = self.begin_address_search(form)?;
        let result = resolver.resolve(pending.query()).await;
        self.finish_address_search(pending, result)
    }

    // ---- Step 2: candidate selection ----

    /// Picks a candidate by its position in the list, replacing any earlier
    /// pick, and estimates its lot.
    pub fn select_candidate(&mut self, index: usize) -> Result<&Selection, WizardError> {
        self.require_step(Step::AddressSelection, "select an address")?;
        let Some(candidate) = self.candidates.get(index).cloned() else {
            return Err(self.reject(WizardError::UnknownCandidate(index)));
        };

        let lot_area_m2 = self.estimator.estimate_lot_area(candidate.location);
        self.events.emit(
            "select",
            format!("{index}: {} ({lot_area_m2} m2)", candidate.formatted_address),
        );
        info!(index, lot_area_m2, address = %candidate.formatted_address, "candidate selected");
        self.notice = None;
        Ok(self.selection.insert(Selection {
            index,
            candidate,
            lot_area_m2,
        }))
    }

    /// Same as [`Self::select_candidate`], addressed by map marker label.
    pub fn select_marker(&mut self, label: &str) -> Result<&Selection, WizardError> {
        self.require_step(Step::AddressSelection, "select an address")?;
        let index = self
            .map
            .as_ref()
            .and_then(|m| m.marker(label))
            .map(|m| m.candidate_index);
        match index {
            Some(index) => self.select_candidate(index),
            None => Err(self.reject(WizardError::UnknownMarker(label.to_string()))),
        }
    }

    /// Generates the first model for the selected lot and shows it.
    ///
    /// The host is (re)initialized every time, so coming back to this step
    /// after `back` starts from a fresh scene.
    pub fn proceed_to_model(&mut self) -> Result<&BuildingModel, WizardError> {
        self.require_step(Step::AddressSelection, "generate the model")?;
        let Some(lot_area_m2) = self.selection.as_ref().map(|s| s.lot_area_m2) else {
            return Err(self.reject(WizardError::NoSelection));
        };
        let parameters = match LotParameters::with_inputs(lot_area_m2, self.inputs) {
            Ok(p) => p,
            Err(e) => return Err(self.reject(e.into())),
        };

        let model = generate(&parameters);
        if let Err(e) = self.show(lot_area_m2, &model) {
            return Err(self.reject(e.into()));
        }

        self.session += 1;
        self.updating = false;
        self.notice = None;
        self.record_generation(&model);
        self.enter(Step::ModelView);
        Ok(&*self.model.insert(model))
    }

    // ---- Step 3: model view ----

    /// Validates new inputs and raises the busy indicator.
    pub fn begin_parameter_update(
        &mut self,
        inputs: BuildingInputs,
    ) -> Result<PendingUpdate, WizardError> {
        self.require_step(Step::ModelView, "update parameters")?;
        if self.updating {
            return Err(self.reject(WizardError::Busy));
        }
        let Some(lot_area_m2) = self.selection.as_ref().map(|s| s.lot_area_m2) else {
            return Err(self.reject(WizardError::NoSelection));
        };
        let parameters = match LotParameters::with_inputs(lot_area_m2, inputs) {
            Ok(p) => p,
            Err(e) => return Err(self.reject(e.into())),
        };

        self.updating = true;
        self.notice = None;
        self.events.emit("busy", "on");
        debug!(
            far = inputs.floor_area_ratio,
            floors = inputs.floor_count,
            "parameter update started"
        );
        Ok(PendingUpdate {
            parameters,
            inputs,
            session: self.session,
        })
    }

    /// Form variant: parses the raw field text first.
    pub fn begin_parameter_update_text(
        &mut self,
        far_text: &str,
        floors_text: &str,
    ) -> Result<PendingUpdate, WizardError> {
        self.require_step(Step::ModelView, "update parameters")?;
        match BuildingInputs::parse(far_text, floors_text) {
            Ok(inputs) => self.begin_parameter_update(inputs),
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// Regenerates with the selected lot and swaps the displayed building.
    pub fn finish_parameter_update(
        &mut self,
        pending: PendingUpdate,
    ) -> Result<&BuildingModel, WizardError> {
        if pending.session != self.session || !self.updating || self.step != Step::ModelView {
            return Err(self.reject(WizardError::Stale));
        }
        self.updating = false;
        self.events.emit("busy", "off");

        let model = generate(&pending.parameters);
        if let Err(e) = self.host.set_building(&model) {
            return Err(self.reject(e.into()));
        }
        self.inputs = pending.inputs;
        self.record_generation(&model);
        Ok(&*self.model.insert(model))
    }

    /// Runs both update phases with `pause` in between.
    pub async fn update_parameters<F: Future<Output = ()>>(
        &mut self,
        inputs: BuildingInputs,
        pause: F,
    ) -> Result<&BuildingModel, WizardError> {
        let pending = self.begin_parameter_update(inputs)?;
        pause.await;
        self.finish_parameter_update(pending)
    }

    // ---- Navigation ----

    pub fn back(&mut self) -> Result<Step, WizardError> {
        let Some(previous) = self.step.previous() else {
            return Err(self.reject(WizardError::InvalidTransition {
                step: self.step,
                action: "go back",
            }));
        };
        if self.step == Step::ModelView {
            self.host.stop();
            self.updating = false;
            self.session += 1;
        }
        self.notice = None;
        self.enter(previous);
        Ok(previous)
    }

    /// Back to an empty address form from anywhere; releases the scene.
    pub fn reset(&mut self) {
        self.host.dispose();
        self.form.clear();
        self.candidates.clear();
        self.map = None;
        self.selection = None;
        self.model = None;
        self.inputs = self.config.default_inputs;
        self.searching = false;
        self.updating = false;
        self.session += 1;
        self.notice = None;
        self.events.emit("reset", format!("session {}", self.session));
        info!("wizard reset");
        self.enter(Step::AddressEntry);
    }

    fn show(&mut self, lot_area_m2: f64, model: &BuildingModel) -> Result<(), SceneError> {
        if self.host.is_initialized() {
            self.host.dispose();
        }
        self.host.initialize(self.viewport)?;
        self.host.set_ground(lot_area_m2)?;
        self.host.set_building(model)?;
        self.host.start();
        Ok(())
    }

    fn record_generation(&mut self, model: &BuildingModel) {
        self.events.emit(
            "generate",
            format!(
                "{} floors, footprint {:.2} m",
                model.floor_count(),
                model.footprint_side_length
            ),
        );
        info!(
            floors = model.floor_count(),
            windows = model.window_count(),
            footprint = model.footprint_side_length,
            "model generated"
        );
    }

    fn enter(&mut self, step: Step) {
        self.step = step;
        self.events.emit("step", step.as_str());
        debug!(step = step.as_str(), "entered step");
    }

    fn require_step(&mut self, step: Step, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            let current = self.step;
            Err(self.reject(WizardError::InvalidTransition {
                step: current,
                action,
            }))
        }
    }

    /// Logs a rejection and turns it into a notice where the user should see
    /// one. Busy and stale completions are dropped silently.
    fn reject(&mut self, err: WizardError) -> WizardError {
        match err {
            WizardError::Busy | WizardError::Stale => {
                debug!(error = %err, "ignored");
            }
            _ => {
                warn!(error = %err, "wizard action rejected");
                self.events.emit("error", err.to_string());
                self.notice = Some(Notice::error(err.user_message()));
            }
        }
        err
    }
}
