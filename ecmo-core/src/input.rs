//! Field specifications and raw inputs for each monitoring domain.
//!
//! Inputs arrive from the presentation layer with every numeric field
//! optional. The presentation layer clamps values to each field's range, but
//! the core validates again before anything reaches a store.

use crate::error::ObservationError;
use crate::record::Domain;

/// Declared range, step and default for one numeric input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub key: &'static str,
    /// Column and form label.
    pub label: &'static str,
    /// Unit shown next to the form field.
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    /// Increment used by the form's step controls.
    pub step: f64,
    /// Value the form starts with.
    pub default: f64,
}

impl FieldSpec {
    /// Check a raw value against this field's declared range.
    pub fn validate(&self, value: Option<f64>) -> Result<f64, ObservationError> {
        let value = value.ok_or(ObservationError::MissingField { field: self.label })?;
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(ObservationError::OutOfRange {
                field: self.label,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Clamp a value into this field's range.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Move `value` by a number of steps, snapping to the step grid and
    /// clamping to the range.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        let raw = value + self.step * f64::from(steps);
        let snapped = (raw / self.step).round() * self.step;
        self.clamp(snapped)
    }
}

/// Specifications for every input field, grouped by domain.
pub mod fields {
    use super::FieldSpec;
    use crate::record::Domain;

    pub const PTT: FieldSpec = FieldSpec {
        key: "ptt",
        label: "PTT",
        unit: "seconds",
        min: 0.0,
        max: 150.0,
        step: 1.0,
        default: 60.0,
    };

    pub const ANTI_XA: FieldSpec = FieldSpec {
        key: "anti_xa",
        label: "Anti-Xa",
        unit: "IU/mL",
        min: 0.0,
        max: 2.0,
        step: 0.1,
        default: 0.3,
    };

    pub const HEPARIN_RATE: FieldSpec = FieldSpec {
        key: "heparin_rate",
        label: "Heparin Rate",
        unit: "units/hr",
        min: 0.0,
        max: 3000.0,
        step: 50.0,
        default: 1000.0,
    };

    pub const PRE_OXYGENATOR: FieldSpec = FieldSpec {
        key: "pre_oxygenator",
        label: "Pre-Oxygenator",
        unit: "mmHg",
        min: 0.0,
        max: 500.0,
        step: 1.0,
        default: 200.0,
    };

    pub const POST_OXYGENATOR: FieldSpec = FieldSpec {
        key: "post_oxygenator",
        label: "Post-Oxygenator",
        unit: "mmHg",
        min: 0.0,
        max: 500.0,
        step: 1.0,
        default: 180.0,
    };

    pub const INPUT_VOLUME: FieldSpec = FieldSpec {
        key: "input",
        label: "Input",
        unit: "mL",
        min: 0.0,
        max: 5000.0,
        step: 10.0,
        default: 0.0,
    };

    pub const OUTPUT_VOLUME: FieldSpec = FieldSpec {
        key: "output",
        label: "Output",
        unit: "mL",
        min: 0.0,
        max: 5000.0,
        step: 10.0,
        default: 0.0,
    };

    pub const FLUID_GOAL: FieldSpec = FieldSpec {
        key: "goal",
        label: "Goal",
        unit: "mL",
        min: 0.0,
        max: 5000.0,
        step: 50.0,
        default: 1000.0,
    };

    pub const DIURETIC_DOSE: FieldSpec = FieldSpec {
        key: "diuretic_dose",
        label: "Diuretic Dose",
        unit: "mg",
        min: 0.0,
        max: 500.0,
        step: 10.0,
        default: 0.0,
    };

    const ANTICOAGULATION: [FieldSpec; 3] = [PTT, ANTI_XA, HEPARIN_RATE];
    const PRESSURE: [FieldSpec; 2] = [PRE_OXYGENATOR, POST_OXYGENATOR];
    const FLUID_BALANCE: [FieldSpec; 4] = [INPUT_VOLUME, OUTPUT_VOLUME, FLUID_GOAL, DIURETIC_DOSE];

    /// Input fields of a domain, in form order.
    pub fn for_domain(domain: Domain) -> &'static [FieldSpec] {
        match domain {
            Domain::Anticoagulation => &ANTICOAGULATION,
            Domain::Pressure => &PRESSURE,
            Domain::FluidBalance => &FLUID_BALANCE,
        }
    }
}

/// Raw anticoagulation measurements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnticoagulationInput {
    /// Partial thromboplastin time, seconds.
    pub ptt: Option<f64>,
    /// Anti-Xa level, IU/mL.
    pub anti_xa: Option<f64>,
    /// Heparin infusion rate, units/hr.
    pub heparin_rate: Option<f64>,
}

/// Raw oxygenator pressures.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PressureInput {
    /// Pre-oxygenator pressure, mmHg.
    pub pre_oxygenator: Option<f64>,
    /// Post-oxygenator pressure, mmHg.
    pub post_oxygenator: Option<f64>,
}

/// Raw fluid balance figures.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FluidBalanceInput {
    /// Input volume, mL.
    pub input: Option<f64>,
    /// Output volume, mL.
    pub output: Option<f64>,
    /// Fluid goal, mL.
    pub goal: Option<f64>,
    /// Diuretic dose, mg.
    pub diuretic_dose: Option<f64>,
}

/// Input for any domain, tagged by `domain` on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "domain", rename_all = "snake_case"))]
pub enum ObservationInput {
    Anticoagulation(AnticoagulationInput),
    Pressure(PressureInput),
    FluidBalance(FluidBalanceInput),
}

impl ObservationInput {
    /// Domain this input belongs to.
    pub fn domain(&self) -> Domain {
        match self {
            ObservationInput::Anticoagulation(_) => Domain::Anticoagulation,
            ObservationInput::Pressure(_) => Domain::Pressure,
            ObservationInput::FluidBalance(_) => Domain::FluidBalance,
        }
    }
}

impl From<AnticoagulationInput> for ObservationInput {
    fn from(input: AnticoagulationInput) -> Self {
        ObservationInput::Anticoagulation(input)
    }
}

impl From<PressureInput> for ObservationInput {
    fn from(input: PressureInput) -> Self {
        ObservationInput::Pressure(input)
    }
}

impl From<FluidBalanceInput> for ObservationInput {
    fn from(input: FluidBalanceInput) -> Self {
        ObservationInput::FluidBalance(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert_eq!(fields::PTT.validate(Some(0.0)), Ok(0.0));
        assert_eq!(fields::PTT.validate(Some(150.0)), Ok(150.0));
    }

    #[test]
    fn test_validate_missing() {
        let err = fields::ANTI_XA.validate(None).unwrap_err();
        assert_eq!(err, ObservationError::MissingField { field: "Anti-Xa" });
    }

    #[test]
    fn test_validate_out_of_range() {
        let err = fields::HEPARIN_RATE.validate(Some(3050.0)).unwrap_err();
        assert!(matches!(err, ObservationError::OutOfRange { field: "Heparin Rate", .. }));

        let err = fields::INPUT_VOLUME.validate(Some(-10.0)).unwrap_err();
        assert_eq!(err.field(), "Input");
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(fields::PRE_OXYGENATOR.validate(Some(f64::NAN)).is_err());
        assert!(fields::PRE_OXYGENATOR.validate(Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_step_by_snaps_and_clamps() {
        let heparin = fields::HEPARIN_RATE;
        assert_eq!(heparin.step_by(1000.0, 1), 1050.0);
        assert_eq!(heparin.step_by(2990.0, 1), 3000.0);
        assert_eq!(heparin.step_by(20.0, -1), 0.0);

        let anti_xa = fields::ANTI_XA;
        let up = anti_xa.step_by(0.3, 1);
        assert!((up - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_nan_goes_to_min() {
        assert_eq!(fields::FLUID_GOAL.clamp(f64::NAN), 0.0);
        assert_eq!(fields::FLUID_GOAL.clamp(9000.0), 5000.0);
    }

    #[test]
    fn test_fields_for_domain() {
        let labels: Vec<&str> =
            fields::for_domain(Domain::FluidBalance).iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Input", "Output", "Goal", "Diuretic Dose"]);
        assert_eq!(fields::for_domain(Domain::Pressure).len(), 2);
    }

    #[test]
    fn test_defaults_lie_within_range() {
        for domain in Domain::ALL {
            for spec in fields::for_domain(domain) {
                assert!(spec.validate(Some(spec.default)).is_ok(), "{}", spec.key);
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_tagged_input_from_json() {
        let json = r#"{"domain":"fluid_balance","input":500,"output":300,"goal":1000}"#;
        let input: ObservationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.domain(), Domain::FluidBalance);
        let ObservationInput::FluidBalance(fluid) = input else {
            panic!("expected fluid balance input");
        };
        assert_eq!(fluid.input, Some(500.0));
        assert_eq!(fluid.diuretic_dose, None);
    }
}
