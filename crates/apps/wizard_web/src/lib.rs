//! Browser front-end for the massing wizard.
//!
//! JS renders the forms, the map widget and the 3D canvas; this module owns
//! the wizard state. After every async completion the registered `on_change`
//! callback fires so the page can re-read `view_json` / `scene_json`.

use console_error_panic_hook::set_once;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use geocoding::{AddressForm, LocationResolver, Provider};
use massing::UniformLotEstimator;
use scene::{Viewport, WorldSceneHost};
use wizard::WizardController;

mod config;
mod fetch;

pub use config::{ProviderConfig, WebConfig};
pub use fetch::FetchResolver;

type Wizard = WizardController<WorldSceneHost, UniformLotEstimator>;

struct WebState {
    wizard: Wizard,
    // Shared so a lookup can run without holding the state borrow.
    resolver: Rc<FetchResolver<Provider>>,
}

impl WebState {
    fn new(config: WebConfig) -> Self {
        let estimator = match config.seed {
            Some(seed) => UniformLotEstimator::seeded(seed),
            None => UniformLotEstimator::from_entropy(),
        };
        Self {
            wizard: WizardController::new(config.wizard, WorldSceneHost::new(), estimator),
            resolver: Rc::new(FetchResolver::new(config.provider.build())),
        }
    }
}

thread_local! {
    static STATE: RefCell<WebState> = RefCell::new(WebState::new(WebConfig::default()));
    static ON_CHANGE: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn with_wizard<T>(f: impl FnOnce(&mut Wizard) -> T) -> T {
    STATE.with(|state| f(&mut state.borrow_mut().wizard))
}

fn notify() {
    let callback = ON_CHANGE.with(|cb| cb.borrow().clone());
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            web_sys::console::error_1(&err);
        }
    }
}

// setTimeout takes a signed 32-bit delay.
fn timeout_ms(ms: u64) -> i32 {
    ms.min(i32::MAX as u64) as i32
}

async fn sleep_ms(ms: u64) -> Result<(), JsValue> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let scheduled = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms(ms))
            });
        if let Err(err) = scheduled {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });
    JsFuture::from(promise).await.map(|_| ())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Replaces the whole session with one built from `config_json`.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = WebConfig::from_json(config_json).map_err(js_err)?;
    config.wizard.validate().map_err(js_err)?;
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.wizard.reset();
        *s = WebState::new(config);
    });
    notify();
    Ok(())
}

#[wasm_bindgen]
pub fn set_on_change(callback: Option<js_sys::Function>) {
    ON_CHANGE.with(|cb| *cb.borrow_mut() = callback);
}

#[wasm_bindgen]
pub fn set_canvas_size(width: f64, height: f64) -> Result<(), JsValue> {
    with_wizard(|w| w.set_viewport(Viewport::new(width, height))).map_err(js_err)
}

/// Starts a lookup for the address form (JSON with `line`, `city`, `region`,
/// `postal_code`, `country`).
#[wasm_bindgen]
pub fn submit_address(form_json: &str) -> Result<(), JsValue> {
    let form: AddressForm = serde_json::from_str(form_json).map_err(js_err)?;
    let begun = STATE.with(|state| {
        let mut s = state.borrow_mut();
        let resolver = Rc::clone(&s.resolver);
        s.wizard
            .begin_address_search(form)
            .map(|pending| (pending, resolver))
    });
    notify();
    let (pending, resolver) = begun.map_err(js_err)?;

    spawn_local(async move {
        let result = resolver.resolve(pending.query()).await;
        match with_wizard(|w| w.finish_address_search(pending, result).map(|c| c.len())) {
            Ok(count) => log(&format!("geocoding returned {count} candidate(s)")),
            Err(err) => log(&format!("address search: {err}")),
        }
        notify();
    });
    Ok(())
}

#[wasm_bindgen]
pub fn select_candidate(index: usize) -> Result<(), JsValue> {
    let result = with_wizard(|w| w.select_candidate(index).map(|_| ()));
    notify();
    result.map_err(js_err)
}

/// Map marker click.
#[wasm_bindgen]
pub fn select_marker(label: &str) -> Result<(), JsValue> {
    let result = with_wizard(|w| w.select_marker(label).map(|_| ()));
    notify();
    result.map_err(js_err)
}

#[wasm_bindgen]
pub fn proceed() -> Result<(), JsValue> {
    let result = with_wizard(|w| w.proceed_to_model().map(|_| ()));
    notify();
    result.map_err(js_err)
}

/// Validates the model-view form, shows the busy indicator and regenerates
/// after the configured delay.
#[wasm_bindgen]
pub fn update_parameters(far: &str, floors: &str) -> Result<(), JsValue> {
    let begun = with_wizard(|w| {
        w.begin_parameter_update_text(far, floors)
            .map(|pending| (pending, w.config().busy_delay_ms))
    });
    notify();
    let (pending, delay_ms) = begun.map_err(js_err)?;

    spawn_local(async move {
        if let Err(err) = sleep_ms(delay_ms).await {
            web_sys::console::error_1(&err);
        }
        match with_wizard(|w| w.finish_parameter_update(pending).map(|m| m.floor_count())) {
            Ok(floors) => log(&format!("model regenerated with {floors} floor(s)")),
            Err(err) => log(&format!("parameter update: {err}")),
        }
        notify();
    });
    Ok(())
}

#[wasm_bindgen]
pub fn back() -> Result<(), JsValue> {
    let result = with_wizard(|w| w.back().map(|_| ()));
    notify();
    result.map_err(js_err)
}

#[wasm_bindgen]
pub fn reset() {
    with_wizard(|w| w.reset());
    notify();
}

/// Pending user-facing message, cleared once read.
#[wasm_bindgen]
pub fn take_notice() -> Option<String> {
    with_wizard(|w| w.take_notice()).map(|n| n.message)
}

/// Steps the scene loop once. Returns the loop time, or `None` while the
/// scene is not running.
#[wasm_bindgen]
pub fn advance_frame() -> Option<f64> {
    with_wizard(|w| w.host_mut().tick()).map(|stats| stats.frame.seconds())
}

#[wasm_bindgen]
pub fn camera_reset() {
    with_wizard(|w| w.host_mut().camera_mut().reset());
}

#[wasm_bindgen]
pub fn camera_orbit(delta_x_px: f64, delta_y_px: f64) {
    with_wizard(|w| w.host_mut().camera_mut().orbit(delta_x_px, delta_y_px));
}

#[wasm_bindgen]
pub fn camera_pan(delta_x_px: f64, delta_y_px: f64) {
    with_wizard(|w| w.host_mut().camera_mut().pan(delta_x_px, delta_y_px));
}

#[wasm_bindgen]
pub fn camera_zoom(wheel_delta_y: f64) {
    with_wizard(|w| w.host_mut().camera_mut().zoom(wheel_delta_y));
}

#[wasm_bindgen]
pub fn view_json() -> Result<String, JsValue> {
    with_wizard(|w| serde_json::to_string(&w.view())).map_err(js_err)
}

/// Flattened draw list plus camera matrix, or `null` before step 3.
#[wasm_bindgen]
pub fn scene_json() -> Result<String, JsValue> {
    with_wizard(|w| serde_json::to_string(&w.host().snapshot())).map_err(js_err)
}

/// Full generated geometry, or `null` before step 3.
#[wasm_bindgen]
pub fn model_json() -> Result<String, JsValue> {
    with_wizard(|w| serde_json::to_string(&w.model())).map_err(js_err)
}

#[cfg(test)]
mod tests {
    use super::timeout_ms;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_delays_saturate_instead_of_wrapping() {
        assert_eq!(timeout_ms(0), 0);
        assert_eq!(timeout_ms(400), 400);
        assert_eq!(timeout_ms(i32::MAX as u64), i32::MAX);
        assert_eq!(timeout_ms(i32::MAX as u64 + 1), i32::MAX);
        assert_eq!(timeout_ms(u64::MAX), i32::MAX);
    }
}
