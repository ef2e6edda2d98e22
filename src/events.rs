use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at;
use crate::ui::FORM_WIDTH;

/// Row of the tab bar.
const TAB_ROW: u16 = 1;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::F(n @ 1..=4) => app.set_view(View::ALL[usize::from(n) - 1]),

        // Selection
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),

        // Stepping
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust(-1),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust(1)
        }
        KeyCode::PageDown => app.adjust(-10),
        KeyCode::PageUp => app.adjust(10),

        // Typing into the selected field
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.type_char(c),
        KeyCode::Backspace => app.delete_char(),

        // Submit
        KeyCode::Enter => app.submit(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel steps the selected value
        MouseEventKind::ScrollUp => app.adjust(1),
        MouseEventKind::ScrollDown => app.adjust(-1),

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            if clicked_row == TAB_ROW {
                if let Some(view) = tab_at(mouse.column) {
                    app.set_view(view);
                }
                return;
            }

            // Forms start below their border; the circuit table also has a
            // header row
            let first_item_row = if app.current_view == View::Circuit {
                content_start_row + 2
            } else if mouse.column < FORM_WIDTH {
                content_start_row + 1
            } else {
                return;
            };
            if clicked_row >= first_item_row {
                app.select_row(usize::from(clicked_row - first_item_row));
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Circuit, CircuitField};
    use crate::ui::Theme;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ecmo_core::{ClockTime, Domain, FixedClock};

    fn app() -> App {
        App::new(None, Circuit::default(), Theme::dark())
            .with_clock(FixedClock::new(ClockTime::from_hms(12, 0, 0).unwrap()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_digits_type_into_form() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Backspace));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        handle_key_event(&mut app, key(KeyCode::Char('7')));
        handle_key_event(&mut app, key(KeyCode::Char('5')));
        assert_eq!(app.form(Domain::Anticoagulation).fields[0].text, "75");
        assert_eq!(app.current_view, View::Anticoagulation);
    }

    #[test]
    fn test_enter_submits_current_form() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::F(3)));
        assert_eq!(app.current_view, View::FluidBalance);
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.dashboard.count(Domain::FluidBalance), 2);
        assert_eq!(app.dashboard.count(Domain::Pressure), 0);
    }

    #[test]
    fn test_arrows_step_selected_field() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.form(Domain::Anticoagulation).fields[2].text, "1050");
        handle_key_event(&mut app, key(KeyCode::Char('-')));
        handle_key_event(&mut app, key(KeyCode::Char('-')));
        assert_eq!(app.form(Domain::Anticoagulation).fields[2].text, "950");
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_tab_cycles_views() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Pressure);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_view, View::Circuit);
    }

    #[test]
    fn test_mouse_selects_tab_and_row() {
        let mut app = app();
        handle_mouse_event(&mut app, click(25, TAB_ROW), 2);
        assert_eq!(app.current_view, View::Pressure);

        // Second field of the pressure form
        handle_mouse_event(&mut app, click(4, 4), 2);
        assert_eq!(app.form(Domain::Pressure).selected, 1);

        // Clicks in the log area leave the selection alone
        handle_mouse_event(&mut app, click(FORM_WIDTH + 5, 3), 2);
        assert_eq!(app.form(Domain::Pressure).selected, 1);

        handle_key_event(&mut app, key(KeyCode::F(4)));
        handle_mouse_event(&mut app, click(4, 6), 2);
        assert_eq!(app.circuit_field, CircuitField::Oxygenator);
    }
}
