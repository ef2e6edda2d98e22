//! Observation log rendering.
//!
//! Draws a domain's [`TableProjection`]: the placeholder message while the
//! store is empty, otherwise every record oldest first with the newest row
//! selected so it stays in view.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use ecmo_core::{Domain, TableProjection};

use crate::app::App;

/// Header of the derived column whose negative values are highlighted.
const BALANCE_COLUMN: &str = "Balance (mL)";

/// Render the observation log of `domain`.
pub fn render(frame: &mut Frame, app: &App, domain: Domain, area: Rect) {
    let projection = app.dashboard.table(domain);

    let block = Block::default()
        .title(format!(" Log ({}) ", projection.row_count()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let (header, rows) = match projection {
        TableProjection::Placeholder(message) => {
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
        TableProjection::Rows { header, rows } => (header, rows),
    };

    let balance_col = header.iter().position(|h| *h == BALANCE_COLUMN);
    let widths: Vec<Constraint> = header.iter().map(|_| Constraint::Fill(1)).collect();
    let header_row = Row::new(header.iter().map(|h| Cell::from(*h)))
        .height(1)
        .style(app.theme.header);

    let row_count = rows.len();
    let rows: Vec<Row> = rows
        .into_iter()
        .map(|cells| {
            Row::new(cells.into_iter().enumerate().map(|(i, text)| {
                let negative = Some(i) == balance_col && text.starts_with('-');
                let style = if negative {
                    Style::default().fg(app.theme.error)
                } else {
                    Style::default()
                };
                Cell::from(text).style(style)
            }))
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(row_count.checked_sub(1));

    frame.render_stateful_widget(table, area, &mut state);
}
