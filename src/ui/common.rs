//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use ecmo_core::Domain;

use crate::app::{App, View};

/// Render the header bar with the circuit summary and per-domain counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ECMO MONITOR ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(app.circuit.summary(), Style::default().fg(app.theme.highlight)),
        Span::raw(" │"),
    ];

    for domain in Domain::ALL {
        let count = app.dashboard.count(domain);
        let count_style = if count == 0 {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::raw(format!(" {}:", short_label(domain))));
        spans.push(Span::styled(count.to_string(), count_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn short_label(domain: Domain) -> &'static str {
    match domain {
        Domain::Anticoagulation => "AC",
        Domain::Pressure => "P",
        Domain::FluidBalance => "FB",
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|v| Line::from(format!(" F{}:{} ", v.index() + 1, v.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .padding("", "")
        .divider("|");

    frame.render_widget(tabs, area);
}

/// View whose tab sits under a column of the tab bar.
pub fn tab_at(column: u16) -> Option<View> {
    let mut start = 0;
    for view in View::ALL {
        // Title padding plus the "|" divider
        let width = format!(" F{}:{} ", view.index() + 1, view.label()).len() as u16 + 1;
        if column < start + width {
            return Some(view);
        }
        start += width;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows the feed description, feed errors and context controls.
/// Temporary status messages take priority.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg.text)).style(app.theme.message_style(msg.is_error));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Circuit => "↑↓:select ←→:change Tab:switch ?:help q:quit",
        _ => "↑↓:field ←→/-+:adjust 0-9:type Enter:add Tab:switch ?:help q:quit",
    };

    let feed = match (app.feed_description(), &app.feed_error) {
        (Some(desc), Some(err)) => {
            let line = Line::from(vec![
                Span::raw(format!(" {} ", desc)),
                Span::styled(format!("({})", err), app.theme.message_style(true)),
                Span::raw(format!(" | {}", controls)),
            ]);
            frame.render_widget(
                Paragraph::new(line).style(Style::default().add_modifier(Modifier::DIM)),
                area,
            );
            return;
        }
        (Some(desc), None) => format!(" {} | ", desc),
        (None, _) => " Manual entry | ".to_string(),
    };

    let paragraph = Paragraph::new(format!("{}{}", feed, controls))
        .style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/S-Tab   Switch views"),
        Line::from("  F1-F4       Jump to view"),
        Line::from("  ↑/↓ j/k     Select field"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Entry forms",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ -/+     Step value"),
        Line::from("  0-9 .       Type value"),
        Line::from("  Backspace   Delete digit"),
        Line::from("  Enter       Add entry"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Circuit",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→         Change selection"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ?         Toggle help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_at_maps_columns_to_views() {
        assert_eq!(tab_at(0), Some(View::Anticoagulation));
        // " F1:Anticoagulation " is 20 columns wide, then the divider
        assert_eq!(tab_at(20), Some(View::Anticoagulation));
        assert_eq!(tab_at(21), Some(View::Pressure));
        assert_eq!(tab_at(200), None);
    }
}
