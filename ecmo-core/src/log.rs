//! Monitoring logs and the append operation.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::chart::ChartProjection;
use crate::clock::Clock;
use crate::command::{AppendCommand, Command, RequestId};
use crate::error::ObservationError;
use crate::input::ObservationInput;
use crate::record::{
    AnticoagulationRecord, AppendContext, Domain, FluidBalanceRecord, Observation, PressureRecord,
};
use crate::store::ObservationStore;
use crate::table::TableProjection;

/// Why an append command left the store unchanged without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The action counter was zero: nothing has been clicked yet.
    NoAction,
    /// A command with the same request id was already applied.
    Duplicate,
}

/// Result of a successful append operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A record was appended at this 0-based position.
    Appended { position: usize },
    /// Nothing was appended.
    Skipped(SkipReason),
}

impl AppendOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, AppendOutcome::Appended { .. })
    }
}

/// One domain's observation store together with the request ids already
/// applied to it.
#[derive(Debug, Clone)]
pub struct MonitoringLog<R> {
    store: ObservationStore<R>,
    applied: HashSet<RequestId>,
}

impl<R: Observation> Default for MonitoringLog<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Observation> MonitoringLog<R> {
    /// Create a log with an empty store.
    pub fn new() -> Self {
        Self {
            store: ObservationStore::new(),
            applied: HashSet::new(),
        }
    }

    /// Validate, stamp and append one observation.
    ///
    /// The store is left unchanged when the action counter is zero, when the
    /// request id has been applied before, or when validation fails. Only the
    /// last case is an error.
    pub fn append(
        &mut self,
        command: AppendCommand<R::Input>,
        clock: &dyn Clock,
    ) -> Result<AppendOutcome, ObservationError> {
        if command.action_count == 0 {
            debug!(domain = %R::DOMAIN, "no action yet, nothing to append");
            return Ok(AppendOutcome::Skipped(SkipReason::NoAction));
        }

        if self.applied.contains(&command.request_id) {
            debug!(domain = %R::DOMAIN, request_id = %command.request_id, "duplicate append ignored");
            return Ok(AppendOutcome::Skipped(SkipReason::Duplicate));
        }

        let ctx = AppendContext {
            timestamp: clock.now(),
            sample_index: self.store.len() + 1,
        };
        let record = R::build(&command.input, ctx).map_err(|e| {
            warn!(domain = %R::DOMAIN, request_id = %command.request_id, error = %e, "observation rejected");
            e
        })?;

        let position = self.store.len();
        self.store.append(record);
        self.applied.insert(command.request_id);

        info!(
            domain = %R::DOMAIN,
            position,
            request_id = %command.request_id,
            timestamp = %ctx.timestamp,
            "observation appended"
        );
        Ok(AppendOutcome::Appended { position })
    }

    /// Read view of the store, consistent with the latest completed append.
    pub fn store(&self) -> &ObservationStore<R> {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Table projection of the whole store.
    pub fn table(&self) -> TableProjection {
        TableProjection::project(&self.store)
    }
}

impl MonitoringLog<PressureRecord> {
    /// Line chart of pre- and post-oxygenator pressure.
    pub fn chart(&self) -> ChartProjection {
        ChartProjection::pressure(&self.store)
    }
}

/// The three monitoring logs of one bedside session.
///
/// Each log is owned here and touched only through its own append; no log
/// ever reads another.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub anticoagulation: MonitoringLog<AnticoagulationRecord>,
    pub pressure: MonitoringLog<PressureRecord>,
    pub fluid_balance: MonitoringLog<FluidBalanceRecord>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a domain-tagged command to its log.
    pub fn dispatch(
        &mut self,
        command: &Command,
        clock: &dyn Clock,
    ) -> Result<AppendOutcome, ObservationError> {
        match command.input {
            ObservationInput::Anticoagulation(input) => {
                self.anticoagulation.append(command.with_input(input), clock)
            }
            ObservationInput::Pressure(input) => {
                self.pressure.append(command.with_input(input), clock)
            }
            ObservationInput::FluidBalance(input) => {
                self.fluid_balance.append(command.with_input(input), clock)
            }
        }
    }

    /// Number of records in a domain's store.
    pub fn count(&self, domain: Domain) -> usize {
        match domain {
            Domain::Anticoagulation => self.anticoagulation.len(),
            Domain::Pressure => self.pressure.len(),
            Domain::FluidBalance => self.fluid_balance.len(),
        }
    }

    /// Table projection of a domain's store.
    pub fn table(&self, domain: Domain) -> TableProjection {
        match domain {
            Domain::Anticoagulation => self.anticoagulation.table(),
            Domain::Pressure => self.pressure.table(),
            Domain::FluidBalance => self.fluid_balance.table(),
        }
    }
}
