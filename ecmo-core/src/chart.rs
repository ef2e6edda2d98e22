//! Line-chart projection of the pressure store.

use crate::record::PressureRecord;
use crate::store::ObservationStore;

/// Title shown while there is nothing to plot.
const EMPTY_TITLE: &str = "No data yet";

/// One named line on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    /// `(x, y)` points in x order.
    pub points: Vec<(f64, f64)>,
}

/// Renderer-agnostic description of a line chart.
///
/// An empty store yields a titled chart with no series rather than an
/// error, so a chart can always be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartProjection {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

impl ChartProjection {
    /// Pre- and post-oxygenator pressure against sample index.
    pub fn pressure(store: &ObservationStore<PressureRecord>) -> Self {
        if store.is_empty() {
            return Self {
                title: EMPTY_TITLE,
                x_label: "Sample",
                y_label: "Pressure (mmHg)",
                series: Vec::new(),
            };
        }

        let x = |r: &PressureRecord| r.sample_index as f64;
        Self {
            title: "Oxygenator Pressure Over Time",
            x_label: "Sample",
            y_label: "Pressure (mmHg)",
            series: vec![
                Series {
                    name: "Pre-Oxygenator",
                    points: store.iter().map(|r| (x(r), r.pre_oxygenator)).collect(),
                },
                Series {
                    name: "Post-Oxygenator",
                    points: store.iter().map(|r| (x(r), r.post_oxygenator)).collect(),
                },
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Axis bounds covering every point, as `([x_min, x_max], [y_min, y_max])`.
    ///
    /// Degenerate ranges are widened so a single sample still gets a
    /// drawable axis. An empty chart gets `[0, 1]` on both axes.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let Some(&(x0, y0)) = points.next() else {
            return ([0.0, 1.0], [0.0, 1.0]);
        };

        let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if x_max - x_min < 1.0 {
            x_max = x_min + 1.0;
        }
        if y_max - y_min < 10.0 {
            y_min = (y_min - 5.0).max(0.0);
            y_max = y_max.max(y_min + 10.0);
        }
        ([x_min, x_max], [y_min, y_max])
    }
}
