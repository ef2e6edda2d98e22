//! Circuit configuration view.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::CircuitField;

/// Render the circuit settings as a selectable table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![Cell::from("Component"), Cell::from("Selection")])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = CircuitField::ALL
        .iter()
        .map(|&field| {
            Row::new(vec![
                Cell::from(field.label()),
                Cell::from(format!("◀ {} ▶", app.circuit.value_label(field))),
            ])
        })
        .collect();

    let selected = CircuitField::ALL.iter().position(|&f| f == app.circuit_field);

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(24)])
        .header(header)
        .block(
            Block::default()
                .title(" Circuit [←→:change] ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected.add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(selected);

    frame.render_stateful_widget(table, area, &mut state);
}
