//! Tabular projection of an observation store.

use crate::record::Observation;
use crate::store::ObservationStore;

/// What the dashboard shows for one domain's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableProjection {
    /// The store is empty. Not an error: the message replaces the table.
    Placeholder(&'static str),
    /// One row per record, oldest first, cells in header order.
    Rows {
        header: Vec<&'static str>,
        rows: Vec<Vec<String>>,
    },
}

impl TableProjection {
    /// Project the full store. Calling this twice on the same store yields
    /// equal projections.
    pub fn project<R: Observation>(store: &ObservationStore<R>) -> Self {
        if store.is_empty() {
            return TableProjection::Placeholder(R::EMPTY_MESSAGE);
        }
        TableProjection::Rows {
            header: R::COLUMNS.to_vec(),
            rows: store.iter().map(R::cells).collect(),
        }
    }

    /// Number of data rows; zero for a placeholder.
    pub fn row_count(&self) -> usize {
        match self {
            TableProjection::Placeholder(_) => 0,
            TableProjection::Rows { rows, .. } => rows.len(),
        }
    }
}
