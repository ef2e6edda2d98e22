//! Input form panel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use ecmo_core::Domain;

use crate::app::App;
use crate::data::FieldState;

/// Render the form of `domain`: one line per field, then the submit hint.
///
/// Fields whose buffer would be rejected on submit are drawn in the error
/// colour.
pub fn render(frame: &mut Frame, app: &App, domain: Domain, area: Rect) {
    let form = app.form(domain);
    let label_width = form.fields.iter().map(label_len).max().unwrap_or(0);

    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == form.selected;
            let marker = if selected { "▶ " } else { "  " };
            let value_style = if !field.is_valid() {
                Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)
            } else if selected {
                app.theme.selected
            } else {
                Style::default()
            };
            let text = if field.text.is_empty() { "_" } else { field.text.as_str() };
            Line::from(vec![
                Span::raw(marker),
                Span::raw(format!(
                    "{:<width$} ",
                    format!("{} ({})", field.spec.label, field.spec.unit),
                    width = label_width
                )),
                Span::styled(format!(" {} ", text), value_style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Enter ", app.theme.tab_active.add_modifier(Modifier::REVERSED)),
        Span::raw(" Add entry"),
    ]));
    lines.push(Line::from(Span::styled(
        format!(" Submitted: {}", form.action_count),
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(format!(" {} ", domain.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn label_len(field: &FieldState) -> usize {
    field.spec.label.chars().count() + field.spec.unit.chars().count() + 3
}
