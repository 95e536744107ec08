use std::time::Duration;

use massing::{BuildingInputs, ParameterError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FLOOR_AREA_RATIO: f64 = 2.0;
pub const DEFAULT_FLOOR_COUNT: u32 = 4;
pub const DEFAULT_BUSY_DELAY_MS: u64 = 100;
pub const DEFAULT_MAP_ZOOM: u8 = 14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Inputs used for the first model of a session.
    pub default_inputs: BuildingInputs,
    /// Pause between raising the busy indicator and regenerating.
    pub busy_delay_ms: u64,
    pub map_zoom: u8,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            default_inputs: BuildingInputs {
                floor_area_ratio: DEFAULT_FLOOR_AREA_RATIO,
                floor_count: DEFAULT_FLOOR_COUNT,
            },
            busy_delay_ms: DEFAULT_BUSY_DELAY_MS,
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl WizardConfig {
    pub fn busy_delay(&self) -> Duration {
        Duration::from_millis(self.busy_delay_ms)
    }

    /// Re-validates the default inputs (they may come from a config file).
    pub fn validate(&self) -> Result<(), ParameterError> {
        let inputs = BuildingInputs::new(
            self.default_inputs.floor_area_ratio,
            self.default_inputs.floor_count as i64,
        )?;
        if inputs.floor_count != self.default_inputs.floor_count {
            return Err(ParameterError::NonPositive {
                field: massing::FIELD_FLOORS,
                value: self.default_inputs.floor_count as f64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::WizardConfig;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: WizardConfig = serde_json::from_str(r#"{ "busy_delay_ms": 0 }"#).unwrap();
        assert_eq!(cfg.busy_delay_ms, 0);
        assert_eq!(cfg.default_inputs, WizardConfig::default().default_inputs);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_defaults_are_caught() {
        let cfg: WizardConfig = serde_json::from_str(
            r#"{ "default_inputs": { "floor_area_ratio": 0.0, "floor_count": 3 } }"#,
        )
        .unwrap();
        assert!(cfg.validate().is_err());

        let cfg: WizardConfig = serde_json::from_str(
            r#"{ "default_inputs": { "floor_area_ratio": 1.0, "floor_count": 0 } }"#,
        )
        .unwrap();
        assert!(cfg.validate().is_err());

        let cfg: WizardConfig = serde_json::from_str(
            r#"{ "default_inputs": { "floor_area_ratio": 1.0, "floor_count": 100000 } }"#,
        )
        .unwrap();
        assert!(cfg.validate().is_err());
    }
}
