use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    NotANumber { field: &'static str, input: String },
    NotWholeNumber { field: &'static str, input: String },
    NonPositive { field: &'static str, value: f64 },
    TooLarge { field: &'static str, value: f64, max: f64 },
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterError::NotANumber { field, input } => {
                write!(f, "{field} must be a number (got {input:?})")
            }
            ParameterError::NotWholeNumber { field, input } => {
                write!(f, "{field} must be a whole number (got {input:?})")
            }
            ParameterError::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero (got {value})")
            }
            ParameterError::TooLarge { field, value, max } => {
                write!(f, "{field} must be at most {max} (got {value})")
            }
        }
    }
}

impl std::error::Error for ParameterError {}

pub const FIELD_LOT_AREA: &str = "lot area";
pub const FIELD_FAR: &str = "floor-area ratio";
pub const FIELD_FLOORS: &str = "number of floors";

/// Upper bound on the floor count; the generator allocates one floor each.
pub const MAX_FLOOR_COUNT: u32 = 200;

/// Validated generator input.
///
/// Fields are private: the only way in is [`LotParameters::new`], so every
/// value reaching the generator is finite and strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LotParameters {
    lot_area_m2: f64,
    floor_area_ratio: f64,
    floor_count: NonZeroU32,
}

impl LotParameters {
    pub fn new(
        lot_area_m2: f64,
        floor_area_ratio: f64,
        floor_count: u32,
    ) -> Result<Self, ParameterError> {
        let lot_area_m2 = positive(FIELD_LOT_AREA, lot_area_m2)?;
        let floor_area_ratio = positive(FIELD_FAR, floor_area_ratio)?;
        let floor_count = NonZeroU32::new(floor_count).ok_or(ParameterError::NonPositive {
            field: FIELD_FLOORS,
            value: 0.0,
        })?;
        if floor_count.get() > MAX_FLOOR_COUNT {
            return Err(too_many_floors(floor_count.get() as i64));
        }
        Ok(Self {
            lot_area_m2,
            floor_area_ratio,
            floor_count,
        })
    }

    pub fn with_inputs(lot_area_m2: f64, inputs: BuildingInputs) -> Result<Self, ParameterError> {
        Self::new(lot_area_m2, inputs.floor_area_ratio, inputs.floor_count)
    }

    pub fn lot_area_m2(&self) -> f64 {
        self.lot_area_m2
    }

    pub fn floor_area_ratio(&self) -> f64 {
        self.floor_area_ratio
    }

    pub fn floor_count(&self) -> u32 {
        self.floor_count.get()
    }
}

/// The two user-editable building inputs from the model-view form.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInputs {
    pub floor_area_ratio: f64,
    pub floor_count: u32,
}

impl BuildingInputs {
    /// Validates raw numbers: the ratio must be finite and positive, a floor
    /// count below one is raised to one, above [`MAX_FLOOR_COUNT`] is an error.
    pub fn new(floor_area_ratio: f64, floor_count: i64) -> Result<Self, ParameterError> {
        let floor_area_ratio = positive(FIELD_FAR, floor_area_ratio)?;
        if floor_count > MAX_FLOOR_COUNT as i64 {
            return Err(too_many_floors(floor_count));
        }
        let floor_count = floor_count.max(1) as u32;
        Ok(Self {
            floor_area_ratio,
            floor_count,
        })
    }

    /// Parses the form fields as typed by the user.
    pub fn parse(far_text: &str, floors_text: &str) -> Result<Self, ParameterError> {
        let far_text = far_text.trim();
        let far: f64 = far_text.parse().map_err(|_| ParameterError::NotANumber {
            field: FIELD_FAR,
            input: far_text.to_string(),
        })?;

        let floors_text = floors_text.trim();
        let floors: i64 = match floors_text.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                return Err(match floors_text.parse::<f64>() {
                    Ok(v) if v.is_finite() => ParameterError::NotWholeNumber {
                        field: FIELD_FLOORS,
                        input: floors_text.to_string(),
                    },
                    _ => ParameterError::NotANumber {
                        field: FIELD_FLOORS,
                        input: floors_text.to_string(),
                    },
                });
            }
        };

        Self::new(far, floors)
    }
}

fn too_many_floors(value: i64) -> ParameterError {
    ParameterError::TooLarge {
        field: FIELD_FLOORS,
        value: value as f64,
        max: MAX_FLOOR_COUNT as f64,
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_nan() {
        return Err(ParameterError::NotANumber {
            field,
            input: value.to_string(),
        });
    }
    if !value.is_finite() || value <= 0.0 {
        return Err(ParameterError::NonPositive { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{BuildingInputs, LotParameters, MAX_FLOOR_COUNT, ParameterError};
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_positive_values() {
        let p = LotParameters::new(400.0, 2.0, 4).unwrap();
        assert_eq!(p.lot_area_m2(), 400.0);
        assert_eq!(p.floor_area_ratio(), 2.0);
        assert_eq!(p.floor_count(), 4);
    }

    #[test]
    fn rejects_zero_floors_and_non_positive_values() {
        assert!(matches!(
            LotParameters::new(400.0, 2.0, 0),
            Err(ParameterError::NonPositive { field: "number of floors", .. })
        ));
        assert!(matches!(
            LotParameters::new(0.0, 2.0, 1),
            Err(ParameterError::NonPositive { field: "lot area", .. })
        ));
        assert!(matches!(
            LotParameters::new(400.0, -1.0, 1),
            Err(ParameterError::NonPositive { field: "floor-area ratio", .. })
        ));
        assert!(LotParameters::new(f64::INFINITY, 1.0, 1).is_err());
        assert!(matches!(
            LotParameters::new(f64::NAN, 1.0, 1),
            Err(ParameterError::NotANumber { .. })
        ));
    }

    #[test]
    fn parse_clamps_floor_count_to_one() {
        let inputs = BuildingInputs::parse("1.5", "-3").unwrap();
        assert_eq!(
            inputs,
            BuildingInputs {
                floor_area_ratio: 1.5,
                floor_count: 1
            }
        );
        assert_eq!(BuildingInputs::parse(" 2 ", "0").unwrap().floor_count, 1);
    }

    #[test]
    fn parse_rejects_bad_text() {
        assert_eq!(
            BuildingInputs::parse("abc", "3"),
            Err(ParameterError::NotANumber {
                field: "floor-area ratio",
                input: "abc".to_string()
            })
        );
        assert_eq!(
            BuildingInputs::parse("2", "3.5"),
            Err(ParameterError::NotWholeNumber {
                field: "number of floors",
                input: "3.5".to_string()
            })
        );
        assert!(matches!(
            BuildingInputs::parse("2", "many"),
            Err(ParameterError::NotANumber { .. })
        ));
        assert!(matches!(
            BuildingInputs::parse("0", "3"),
            Err(ParameterError::NonPositive { .. })
        ));
    }

    #[test]
    fn oversized_floor_count_is_rejected_not_truncated() {
        assert_eq!(
            BuildingInputs::parse("2", "99999999999"),
            Err(ParameterError::TooLarge {
                field: "number of floors",
                value: 99999999999.0,
                max: 200.0
            })
        );
        assert!(matches!(
            BuildingInputs::new(2.0, MAX_FLOOR_COUNT as i64 + 1),
            Err(ParameterError::TooLarge { .. })
        ));
        assert!(matches!(
            LotParameters::new(400.0, 2.0, u32::MAX),
            Err(ParameterError::TooLarge { .. })
        ));

        let top = BuildingInputs::new(2.0, MAX_FLOOR_COUNT as i64).unwrap();
        assert_eq!(top.floor_count, MAX_FLOOR_COUNT);
        assert!(LotParameters::with_inputs(400.0, top).is_ok());
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = BuildingInputs::parse("-2", "3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "floor-area ratio must be greater than zero (got -2)"
        );
    }
}
