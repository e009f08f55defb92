//! Density preview: the current curve drawn with a ratatui `Chart`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::config::Theme;
use crate::controller::DrawRequest;
use crate::error::GadgetError;

/// Plot marker from the `display.marker` config value.
pub fn marker_from_name(name: &str) -> symbols::Marker {
    match name {
        "dot" => symbols::Marker::Dot,
        "block" => symbols::Marker::HalfBlock,
        _ => symbols::Marker::Braille,
    }
}

/// Renders the preview, or why there is none.
pub fn render_density_chart(
    area: Rect,
    buf: &mut Buffer,
    request: Result<&DrawRequest, &GadgetError>,
    marker: symbols::Marker,
    theme: &Theme,
) {
    let border_color = theme.get("border");
    let text_primary = theme.get("text_primary");
    let text_secondary = theme.get("text_secondary");

    let title = match request {
        Ok(request) => format!(" {} ", request.title),
        Err(_) => " Density ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let request = match request {
        Ok(request) => request,
        Err(e) => {
            Paragraph::new(format!("No preview: {}", e))
                .style(Style::default().fg(text_secondary))
                .centered()
                .render(inner, buf);
            return;
        }
    };

    if request.points.is_empty() {
        Paragraph::new("No finite density values in range")
            .style(Style::default().fg(text_secondary))
            .centered()
            .render(inner, buf);
        return;
    }

    let (x_min, x_max) = request.x_range;
    let (y_min, y_max) = request.y_range();

    let dataset = Dataset::default()
        .marker(marker)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.get("curve")))
        .data(&request.points);

    let axis_label_style = Style::default().fg(text_primary);
    let labels = |lo: f64, hi: f64| {
        vec![
            Span::styled(format_axis_label(lo), axis_label_style),
            Span::styled(format_axis_label((lo + hi) / 2.0), axis_label_style),
            Span::styled(format_axis_label(hi), axis_label_style),
        ]
    };

    let x_axis = Axis::default()
        .title(request.x_label)
        .bounds([x_min, x_max])
        .style(axis_label_style)
        .labels(labels(x_min, x_max));
    let y_axis = Axis::default()
        .title(request.y_label)
        .bounds([y_min, y_max])
        .style(axis_label_style)
        .labels(labels(y_min, y_max));

    Chart::new(vec![dataset])
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(None)
        .render(inner, buf);
}

pub fn format_axis_label(v: f64) -> String {
    if v.abs() >= 1e6 || (v.abs() < 1e-2 && v != 0.0) {
        format!("{:.2e}", v)
    } else {
        format!("{:.2}", v)
    }
}
