//! Mutex-guarded log for deployments with several concurrent clients.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::Clock;
use crate::command::AppendCommand;
use crate::error::ObservationError;
use crate::log::{AppendOutcome, MonitoringLog};
use crate::record::Observation;
use crate::table::TableProjection;

/// A [`MonitoringLog`] shared between clients.
///
/// Each domain gets its own `SharedLog`, so there is exactly one mutex per
/// domain and never a lock spanning two domains. Appending and projecting
/// happen under one critical section, which keeps a client's
/// append-then-read atomic with respect to other clients.
#[derive(Debug)]
pub struct SharedLog<R> {
    inner: Arc<Mutex<MonitoringLog<R>>>,
}

impl<R> Clone for SharedLog<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Observation> Default for SharedLog<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Observation> SharedLog<R> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MonitoringLog::new())),
        }
    }

    /// Append and return the table as it stands right after this append.
    ///
    /// The projection is returned even when the append is rejected, so the
    /// caller can always redraw.
    pub fn append_and_project(
        &self,
        command: AppendCommand<R::Input>,
        clock: &dyn Clock,
    ) -> (Result<AppendOutcome, ObservationError>, TableProjection) {
        let mut log = self.inner.lock();
        let outcome = log.append(command, clock);
        (outcome, log.table())
    }

    /// Current table projection.
    pub fn table(&self) -> TableProjection {
        self.inner.lock().table()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` against the log while holding the lock.
    pub fn with<T>(&self, f: impl FnOnce(&MonitoringLog<R>) -> T) -> T {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::clock::{ClockTime, FixedClock};
    use crate::command::RequestId;
    use crate::input::PressureInput;
    use crate::record::PressureRecord;

    #[test]
    fn test_append_and_project_sees_own_append() {
        let shared: SharedLog<PressureRecord> = SharedLog::new();
        let clock = FixedClock::new(ClockTime::from_hms(12, 0, 0).unwrap());
        let input = PressureInput {
            pre_oxygenator: Some(200.0),
            post_oxygenator: Some(180.0),
        };

        let (outcome, table) =
            shared.append_and_project(AppendCommand::new(RequestId::new(), 1, input), &clock);
        assert!(outcome.unwrap().is_appended());
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_concurrent_clients_get_unique_sample_indices() {
        let shared: SharedLog<PressureRecord> = SharedLog::new();
        let threads: u64 = 8;
        let per_thread: u64 = 25;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let clock = FixedClock::new(ClockTime::from_hms(12, 0, 0).unwrap());
                    for n in 0..per_thread {
                        let input = PressureInput {
                            pre_oxygenator: Some(100.0 + t as f64),
                            post_oxygenator: Some(90.0),
                        };
                        let command = AppendCommand::new(RequestId::new(), n + 1, input);
                        let (outcome, table) = shared.append_and_project(command, &clock);
                        let outcome = outcome.unwrap();
                        let AppendOutcome::Appended { position } = outcome else {
                            panic!("unexpected outcome {:?}", outcome);
                        };
                        // The projection includes this client's own record
                        assert!(table.row_count() > position);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), (threads * per_thread) as usize);
        shared.with(|log| {
            for (i, record) in log.store().iter().enumerate() {
                assert_eq!(record.sample_index, i + 1);
            }
        });
    }
}
