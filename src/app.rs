//! Application state and navigation logic.

use std::time::{Duration, Instant};

use ecmo_core::{
    AppendOutcome, Clock, Command, Dashboard, Domain, SkipReason, SystemClock,
};
use tracing::info;

use crate::data::{Circuit, CircuitField, FormState};
use crate::feed::CommandFeed;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// PTT, Anti-Xa and heparin rate log.
    Anticoagulation,
    /// Pre/post-oxygenator pressure log and chart.
    Pressure,
    /// Fluid input/output log with running balance per entry.
    FluidBalance,
    /// Cannula and oxygenator selection.
    Circuit,
}

impl View {
    pub const ALL: [View; 4] =
        [View::Anticoagulation, View::Pressure, View::FluidBalance, View::Circuit];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Anticoagulation => View::Pressure,
            View::Pressure => View::FluidBalance,
            View::FluidBalance => View::Circuit,
            View::Circuit => View::Anticoagulation,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Anticoagulation => View::Circuit,
            View::Pressure => View::Anticoagulation,
            View::FluidBalance => View::Pressure,
            View::Circuit => View::FluidBalance,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Anticoagulation => "Anticoagulation",
            View::Pressure => "Pressure",
            View::FluidBalance => "Fluid Balance",
            View::Circuit => "Circuit",
        }
    }

    /// Monitoring domain shown by this view, if any.
    pub fn domain(&self) -> Option<Domain> {
        match self {
            View::Anticoagulation => Some(Domain::Anticoagulation),
            View::Pressure => Some(Domain::Pressure),
            View::FluidBalance => Some(Domain::FluidBalance),
            View::Circuit => None,
        }
    }

    /// Position in the tab bar.
    pub fn index(&self) -> usize {
        match self {
            View::Anticoagulation => 0,
            View::Pressure => 1,
            View::FluidBalance => 2,
            View::Circuit => 3,
        }
    }
}

/// Temporary feedback shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub at: Instant,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Monitoring logs
    pub dashboard: Dashboard,
    clock: Box<dyn Clock + Send>,

    // Input
    forms: [FormState; 3],
    feed: Option<Box<dyn CommandFeed>>,
    pub feed_error: Option<String>,

    // Circuit configuration
    pub circuit: Circuit,
    pub circuit_field: CircuitField,

    // UI
    pub theme: Theme,
    pub status_message: Option<StatusMessage>,
}

impl App {
    /// Create a new App with empty logs, an optional command feed and the
    /// given circuit configuration.
    pub fn new(feed: Option<Box<dyn CommandFeed>>, circuit: Circuit, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Anticoagulation,
            show_help: false,
            dashboard: Dashboard::new(),
            clock: Box::new(SystemClock),
            forms: Domain::ALL.map(FormState::new),
            feed,
            feed_error: None,
            circuit,
            circuit_field: CircuitField::default(),
            theme,
            status_message: None,
        }
    }

    /// Replace the wall clock used to stamp observations.
    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Returns a description of the command feed, if one is attached.
    pub fn feed_description(&self) -> Option<&str> {
        self.feed.as_ref().map(|f| f.description())
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            at: Instant::now(),
        });
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&StatusMessage> {
        self.status_message.as_ref().filter(|m| m.at.elapsed() < STATUS_MESSAGE_TTL)
    }

    /// Form for a monitoring domain.
    pub fn form(&self, domain: Domain) -> &FormState {
        &self.forms[domain_slot(domain)]
    }

    pub fn form_mut(&mut self, domain: Domain) -> &mut FormState {
        &mut self.forms[domain_slot(domain)]
    }

    /// Form of the current view, if it has one.
    pub fn current_form_mut(&mut self) -> Option<&mut FormState> {
        let domain = self.current_view.domain()?;
        Some(self.form_mut(domain))
    }

    /// Submit the current view's form as one user action.
    pub fn submit(&mut self) {
        let Some(form) = self.current_form_mut() else {
            return;
        };
        let command = form.submit();
        self.apply(&command);
    }

    /// Dispatch a command to its log and report the outcome.
    pub fn apply(&mut self, command: &Command) -> Option<AppendOutcome> {
        let domain = command.input.domain();
        match self.dashboard.dispatch(command, self.clock.as_ref()) {
            Ok(outcome @ AppendOutcome::Appended { position }) => {
                self.set_status_message(
                    format!("Added {} entry #{}", domain.label(), position + 1),
                    false,
                );
                Some(outcome)
            }
            Ok(outcome @ AppendOutcome::Skipped(SkipReason::Duplicate)) => {
                self.set_status_message(
                    format!("Ignored repeated {} entry", domain.label()),
                    false,
                );
                Some(outcome)
            }
            Ok(outcome @ AppendOutcome::Skipped(SkipReason::NoAction)) => Some(outcome),
            Err(e) => {
                self.set_status_message(e.to_string(), true);
                None
            }
        }
    }

    /// Drain the command feed into the logs.
    ///
    /// Returns the number of records appended.
    pub fn poll_feed(&mut self) -> usize {
        let Some(mut feed) = self.feed.take() else {
            return 0;
        };

        let mut appended = 0;
        while let Some(command) = feed.poll() {
            if matches!(self.apply(&command), Some(AppendOutcome::Appended { .. })) {
                appended += 1;
            }
        }

        let error = feed.error();
        if error.is_some() && error != self.feed_error {
            info!(feed = feed.description(), error = ?error, "command feed reported an error");
        }
        self.feed_error = error;
        self.feed = Some(feed);
        appended
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down one row (form field or circuit option).
    pub fn select_next(&mut self) {
        if self.current_view == View::Circuit {
            self.circuit_field = self.circuit_field.next();
        } else if let Some(form) = self.current_form_mut() {
            form.select_next();
        }
    }

    /// Move selection up one row.
    pub fn select_prev(&mut self) {
        if self.current_view == View::Circuit {
            self.circuit_field = self.circuit_field.prev();
        } else if let Some(form) = self.current_form_mut() {
            form.select_prev();
        }
    }

    /// Select a row of the current view by index; out-of-range rows are
    /// ignored.
    pub fn select_row(&mut self, index: usize) {
        if self.current_view == View::Circuit {
            if let Some(&field) = CircuitField::ALL.get(index) {
                self.circuit_field = field;
            }
        } else if let Some(form) = self.current_form_mut() {
            form.select(index);
        }
    }

    /// Step the selected value: a form field by its step, or a circuit
    /// option to its neighbour.
    pub fn adjust(&mut self, steps: i32) {
        if self.current_view == View::Circuit {
            self.circuit.cycle(self.circuit_field, steps > 0);
        } else if let Some(field) = self.current_form_mut().and_then(|f| f.selected_field_mut()) {
            field.step(steps);
        }
    }

    /// Type a character into the selected form field.
    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.current_form_mut().and_then(|f| f.selected_field_mut()) {
            field.push_char(c);
        }
    }

    /// Delete the last character of the selected form field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.current_form_mut().and_then(|f| f.selected_field_mut()) {
            field.pop_char();
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn domain_slot(domain: Domain) -> usize {
    match domain {
        Domain::Anticoagulation => 0,
        Domain::Pressure => 1,
        Domain::FluidBalance => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ChannelFeed;
    use ecmo_core::{ClockTime, FixedClock, PressureInput, RequestId, TableProjection};

    fn app() -> App {
        App::new(None, Circuit::default(), Theme::dark())
            .with_clock(FixedClock::new(ClockTime::from_hms(8, 0, 0).unwrap()))
    }

    #[test]
    fn test_nothing_rendered_before_first_submit() {
        let app = app();
        for domain in Domain::ALL {
            assert_eq!(app.dashboard.count(domain), 0);
        }
        assert!(matches!(
            app.dashboard.table(Domain::Pressure),
            TableProjection::Placeholder(_)
        ));
        assert_eq!(app.dashboard.pressure.chart().title, "No data yet");
    }

    #[test]
    fn test_submit_appends_to_current_domain() {
        let mut app = app();
        app.set_view(View::Pressure);
        app.submit();
        app.submit();

        assert_eq!(app.dashboard.count(Domain::Pressure), 2);
        assert_eq!(app.dashboard.count(Domain::Anticoagulation), 0);
        assert_eq!(app.form(Domain::Pressure).action_count, 2);
        let msg = app.get_status_message().unwrap();
        assert_eq!(msg.text, "Added Oxygenator Pressure entry #2");
        assert!(!msg.is_error);
    }

    #[test]
    fn test_invalid_field_reports_error_and_appends_nothing() {
        let mut app = app();
        app.set_view(View::FluidBalance);
        app.form_mut(Domain::FluidBalance).fields[0].text.clear();
        app.submit();

        assert_eq!(app.dashboard.count(Domain::FluidBalance), 0);
        let msg = app.get_status_message().unwrap();
        assert!(msg.is_error);
        assert!(msg.text.contains("Input is missing"));

        // Typed out-of-range value is rejected as well
        app.form_mut(Domain::FluidBalance).fields[0].text = "9000".to_string();
        app.submit();
        assert_eq!(app.dashboard.count(Domain::FluidBalance), 0);

        app.form_mut(Domain::FluidBalance).fields[0].text = "500".to_string();
        app.submit();
        assert_eq!(app.dashboard.count(Domain::FluidBalance), 1);
    }

    #[test]
    fn test_submit_on_circuit_view_does_nothing() {
        let mut app = app();
        app.set_view(View::Circuit);
        app.submit();
        for domain in Domain::ALL {
            assert_eq!(app.dashboard.count(domain), 0);
        }
    }

    #[test]
    fn test_adjust_and_typing_edit_selected_field() {
        let mut app = app();
        app.adjust(2);
        assert_eq!(app.form(Domain::Anticoagulation).fields[0].text, "62");

        app.select_next();
        app.delete_char();
        app.delete_char();
        app.delete_char();
        app.type_char('1');
        app.type_char('.');
        app.type_char('5');
        assert_eq!(app.form(Domain::Anticoagulation).fields[1].text, "1.5");
    }

    #[test]
    fn test_circuit_view_cycles_options() {
        let mut app = app();
        app.set_view(View::Circuit);
        app.adjust(1);
        assert_eq!(app.circuit.drainage_fr(), 27);
        app.select_next();
        app.adjust(-1);
        assert_eq!(app.circuit.return_fr(), 17);
    }

    #[test]
    fn test_view_cycle() {
        let mut app = app();
        for _ in 0..View::ALL.len() {
            app.next_view();
        }
        assert_eq!(app.current_view, View::Anticoagulation);
        app.prev_view();
        assert_eq!(app.current_view, View::Circuit);
    }

    #[test]
    fn test_feed_commands_are_applied_once() {
        let (tx, feed) = ChannelFeed::create("test", 8);
        let mut app = App::new(Some(Box::new(feed)), Circuit::default(), Theme::dark())
            .with_clock(FixedClock::new(ClockTime::from_hms(8, 0, 0).unwrap()));

        let input = PressureInput {
            pre_oxygenator: Some(200.0),
            post_oxygenator: Some(180.0),
        };
        let command = Command::new(RequestId::new(), 1, input);
        tx.try_send(command.clone()).unwrap();
        tx.try_send(command).unwrap();

        assert_eq!(app.poll_feed(), 1);
        assert_eq!(app.dashboard.count(Domain::Pressure), 1);
        assert_eq!(app.feed_description(), Some("channel: test"));

        drop(tx);
        app.poll_feed();
        assert_eq!(app.feed_error.as_deref(), Some("Channel closed"));
    }
}
