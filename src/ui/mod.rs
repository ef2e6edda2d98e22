//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`table`]: Append-only observation log of one domain
//! - [`form`]: Numeric input form and submit control of one domain
//! - [`chart`]: Pre/post-oxygenator pressure line chart
//! - [`circuit`]: Cannula and oxygenator selection
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├────────────┬─────────────────────────┤
//! │ form       │ table                   │
//! │            ├─────────────────────────┤
//! │            │ chart (Pressure only)   │
//! ├────────────┴─────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod chart;
pub mod circuit;
pub mod common;
pub mod form;
pub mod table;
pub mod theme;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::{App, View};

pub use theme::Theme;

/// Width of the input form column.
pub const FORM_WIDTH: u16 = 34;

/// Render the content area of the current view.
pub fn render_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(domain) = app.current_view.domain() else {
        circuit::render(frame, app, area);
        return;
    };

    let [form_area, log_area] =
        Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(20)]).areas(area);

    form::render(frame, app, domain, form_area);

    if app.current_view == View::Pressure {
        let [table_area, chart_area] =
            Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(log_area);
        table::render(frame, app, domain, table_area);
        chart::render(frame, app, chart_area);
    } else {
        table::render(frame, app, domain, log_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Circuit;
    use ecmo_core::{ClockTime, Domain, FixedClock};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
        terminal.draw(|frame| render_view(frame, app, frame.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn app() -> App {
        App::new(None, Circuit::default(), Theme::dark())
            .with_clock(FixedClock::new(ClockTime::from_hms(7, 45, 0).unwrap()))
    }

    #[test]
    fn test_empty_pressure_view_shows_placeholders() {
        let mut app = app();
        app.set_view(View::Pressure);
        let text = screen(&app);
        assert!(text.contains("No pressure data yet."));
        assert!(text.contains("No data yet"));
        assert!(text.contains("Pre-Oxygenator (mmHg)"));
    }

    #[test]
    fn test_submitted_rows_are_rendered() {
        let mut app = app();
        app.set_view(View::FluidBalance);
        app.form_mut(Domain::FluidBalance).fields[1].text = "250".to_string();
        app.submit();

        let text = screen(&app);
        assert!(!text.contains("No fluid balance data yet."));
        assert!(text.contains("Balance (mL)"));
        assert!(text.contains("07:45:00"));
        assert!(text.contains("-250"));
    }

    #[test]
    fn test_circuit_view_lists_selection() {
        let mut app = app();
        app.set_view(View::Circuit);
        let text = screen(&app);
        assert!(text.contains("Drainage Cannula"));
        assert!(text.contains("25 Fr"));
        assert!(text.contains("Quadrox-i Adult"));
    }
}
