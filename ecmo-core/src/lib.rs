//! # ecmo-core
//!
//! The append-only clinical time-series model behind the ECMO bedside
//! dashboard. Three monitoring domains (anticoagulation, oxygenator pressure
//! and fluid balance) each keep their own ordered log of observations.
//!
//! ## Design Goals
//!
//! - **Append-only**: records are never mutated or removed once logged
//! - **Typed records**: one fixed-field struct per domain, no free-form maps
//! - **Idempotent appends**: every command carries a unique request id and a
//!   replayed command is a no-op
//! - **Pure projections**: tables and charts are recomputed from the store and
//!   never fail, even when the store is empty
//!
//! ## Features
//!
//! - `serde`: wire format for commands and inputs (used by command feeds)
//!
//! ## Example
//!
//! ```rust
//! use ecmo_core::{
//!     AppendCommand, ChartProjection, ClockTime, FixedClock, MonitoringLog, PressureInput,
//!     PressureRecord, RequestId,
//! };
//!
//! let clock = FixedClock::new(ClockTime::from_hms(8, 30, 0).unwrap());
//! let mut log: MonitoringLog<PressureRecord> = MonitoringLog::new();
//!
//! let input = PressureInput { pre_oxygenator: Some(200.0), post_oxygenator: Some(180.0) };
//! log.append(AppendCommand::new(RequestId::new(), 1, input), &clock).unwrap();
//!
//! let chart = ChartProjection::pressure(log.store());
//! assert_eq!(chart.series[0].points, vec![(1.0, 200.0)]);
//! ```

mod chart;
mod clock;
mod command;
mod error;
mod input;
mod log;
mod record;
mod shared;
mod store;
mod table;

pub use chart::{ChartProjection, Series};
pub use clock::{Clock, ClockTime, FixedClock, SystemClock};
pub use command::{AppendCommand, Command, RequestId};
pub use error::ObservationError;
pub use input::{
    fields, AnticoagulationInput, FieldSpec, FluidBalanceInput, ObservationInput, PressureInput,
};
pub use log::{AppendOutcome, Dashboard, MonitoringLog, SkipReason};
pub use record::{
    format_value, AnticoagulationRecord, AppendContext, Domain, FluidBalanceRecord, Observation,
    PressureRecord,
};
pub use shared::SharedLog;
pub use store::ObservationStore;
pub use table::TableProjection;
