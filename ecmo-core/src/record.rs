//! Observation records, one fixed-field struct per monitoring domain.

use std::fmt;

use crate::clock::ClockTime;
use crate::error::ObservationError;
use crate::input::{fields, AnticoagulationInput, FluidBalanceInput, PressureInput};

/// The three independent monitoring domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Anticoagulation,
    Pressure,
    FluidBalance,
}

impl Domain {
    /// Every domain, in dashboard order.
    pub const ALL: [Domain; 3] = [Domain::Anticoagulation, Domain::Pressure, Domain::FluidBalance];

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Anticoagulation => "Anticoagulation",
            Domain::Pressure => "Oxygenator Pressure",
            Domain::FluidBalance => "Fluid Balance",
        }
    }

    /// Name used on the wire and in logs.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Domain::Anticoagulation => "anticoagulation",
            Domain::Pressure => "pressure",
            Domain::FluidBalance => "fluid_balance",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Values assigned by the store at append time, never by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendContext {
    /// Capture time of the observation.
    pub timestamp: ClockTime,
    /// 1-based position the record will occupy in its store.
    pub sample_index: usize,
}

/// A record type that can live in an observation store.
pub trait Observation: Sized {
    /// Raw, unvalidated input for this domain.
    type Input;

    /// Domain tag.
    const DOMAIN: Domain;

    /// Column headers in canonical order, derived fields included.
    const COLUMNS: &'static [&'static str];

    /// Message shown instead of a table when the store is empty.
    const EMPTY_MESSAGE: &'static str;

    /// Validate the input and build a complete record, computing derived
    /// fields.
    fn build(input: &Self::Input, ctx: AppendContext) -> Result<Self, ObservationError>;

    /// Display cells, one per entry in [`Observation::COLUMNS`].
    fn cells(&self) -> Vec<String>;

    /// Capture time of the record.
    fn timestamp(&self) -> ClockTime;
}

/// Format a numeric field for display.
///
/// Integral values print without a fractional part; anything else prints
/// with at most two decimals and no trailing zeros.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Anticoagulation status at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnticoagulationRecord {
    pub timestamp: ClockTime,
    pub ptt: f64,
    pub anti_xa: f64,
    pub heparin_rate: f64,
}

impl Observation for AnticoagulationRecord {
    type Input = AnticoagulationInput;
    const DOMAIN: Domain = Domain::Anticoagulation;
    const COLUMNS: &'static [&'static str] = &["timestamp", "PTT", "Anti-Xa", "Heparin Rate"];
    const EMPTY_MESSAGE: &'static str = "No anticoagulation data yet.";

    fn build(input: &Self::Input, ctx: AppendContext) -> Result<Self, ObservationError> {
        Ok(Self {
            timestamp: ctx.timestamp,
            ptt: fields::PTT.validate(input.ptt)?,
            anti_xa: fields::ANTI_XA.validate(input.anti_xa)?,
            heparin_rate: fields::HEPARIN_RATE.validate(input.heparin_rate)?,
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.timestamp.to_string(),
            format_value(self.ptt),
            format_value(self.anti_xa),
            format_value(self.heparin_rate),
        ]
    }

    fn timestamp(&self) -> ClockTime {
        self.timestamp
    }
}

/// Oxygenator pressures for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureRecord {
    /// 1-based running count, the chart's x axis.
    pub sample_index: usize,
    pub pre_oxygenator: f64,
    pub post_oxygenator: f64,
    pub timestamp: ClockTime,
}

impl Observation for PressureRecord {
    type Input = PressureInput;
    const DOMAIN: Domain = Domain::Pressure;
    const COLUMNS: &'static [&'static str] =
        &["Sample", "Pre-Oxygenator", "Post-Oxygenator", "timestamp"];
    const EMPTY_MESSAGE: &'static str = "No pressure data yet.";

    fn build(input: &Self::Input, ctx: AppendContext) -> Result<Self, ObservationError> {
        Ok(Self {
            sample_index: ctx.sample_index,
            pre_oxygenator: fields::PRE_OXYGENATOR.validate(input.pre_oxygenator)?,
            post_oxygenator: fields::POST_OXYGENATOR.validate(input.post_oxygenator)?,
            timestamp: ctx.timestamp,
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.sample_index.to_string(),
            format_value(self.pre_oxygenator),
            format_value(self.post_oxygenator),
            self.timestamp.to_string(),
        ]
    }

    fn timestamp(&self) -> ClockTime {
        self.timestamp
    }
}

/// Fluid in and out over one charting interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidBalanceRecord {
    pub timestamp: ClockTime,
    pub input: f64,
    pub output: f64,
    /// `input - output`; negative when more fluid left than went in.
    pub balance: f64,
    pub goal: f64,
    pub diuretic_dose: f64,
}

impl Observation for FluidBalanceRecord {
    type Input = FluidBalanceInput;
    const DOMAIN: Domain = Domain::FluidBalance;
    const COLUMNS: &'static [&'static str] = &[
        "timestamp",
        "Input (mL)",
        "Output (mL)",
        "Balance (mL)",
        "Goal (mL)",
        "Diuretic Dose (mg)",
    ];
    const EMPTY_MESSAGE: &'static str = "No fluid balance data yet.";

    fn build(input: &Self::Input, ctx: AppendContext) -> Result<Self, ObservationError> {
        let volume_in = fields::INPUT_VOLUME.validate(input.input)?;
        let volume_out = fields::OUTPUT_VOLUME.validate(input.output)?;
        Ok(Self {
            timestamp: ctx.timestamp,
            input: volume_in,
            output: volume_out,
            balance: volume_in - volume_out,
            goal: fields::FLUID_GOAL.validate(input.goal)?,
            diuretic_dose: fields::DIURETIC_DOSE.validate(input.diuretic_dose)?,
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.timestamp.to_string(),
            format_value(self.input),
            format_value(self.output),
            format_value(self.balance),
            format_value(self.goal),
            format_value(self.diuretic_dose),
        ]
    }

    fn timestamp(&self) -> ClockTime {
        self.timestamp
    }
}
