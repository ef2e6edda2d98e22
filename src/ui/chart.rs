//! Pressure chart rendering.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use ecmo_core::format_value;

use crate::app::App;

/// Render the pre/post-oxygenator pressure chart.
///
/// With no samples the chart still draws its axes under the "No data yet"
/// title.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let projection = app.dashboard.pressure.chart();
    let ([x_min, x_max], [y_min, y_max]) = projection.bounds();

    let colors = [app.theme.pre_series, app.theme.post_series];
    let datasets: Vec<Dataset> = projection
        .series
        .iter()
        .zip(colors)
        .map(|(series, color)| {
            Dataset::default()
                .name(series.name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&series.points)
        })
        .collect();

    let axis_style = Style::default().fg(app.theme.border);
    let label = |v: f64| Span::raw(format_value(v.round()));

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", projection.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .title(projection.x_label)
                .style(axis_style)
                .bounds([x_min, x_max])
                .labels([label(x_min), label((x_min + x_max) / 2.0), label(x_max)]),
        )
        .y_axis(
            Axis::default()
                .title(projection.y_label)
                .style(axis_style)
                .bounds([y_min, y_max])
                .labels([label(y_min), label((y_min + y_max) / 2.0), label(y_max)]),
        )
        .legend_position(Some(LegendPosition::TopRight));

    frame.render_widget(chart, area);
}
