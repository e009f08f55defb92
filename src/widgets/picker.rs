//! Picker sidebar: distribution list, parameterization radio, parameter sliders, plot limits.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, StatefulWidget, Widget},
};

use crate::config::Theme;
use crate::controller::{Axis, Bound, LimitControl, PanelView, ParameterWidget};
use crate::picker::{PickerFocus, PickerState};

const LABEL_WIDTH: u16 = 14;

struct Palette {
    border: Color,
    active: Color,
    text: Color,
    value: Color,
    dimmed: Color,
}

impl Palette {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            border: theme.get("border"),
            active: theme.get("border_active"),
            text: theme.get("text_primary"),
            value: theme.get("primary"),
            dimmed: theme.get("dimmed"),
        }
    }

    fn label(&self, focused: bool, enabled: bool) -> Style {
        if !enabled {
            Style::default().fg(self.dimmed)
        } else if focused {
            Style::default().fg(self.active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }
}

/// Slider track for `value` in `[min, max]`, `width` cells wide.
pub fn slider_track(value: Option<f64>, min: f64, max: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let Some(value) = value else {
        return "─".repeat(width);
    };
    let span = if max > min { max - min } else { 1.0 };
    let frac = ((value - min) / span).clamp(0.0, 1.0);
    let pos = (frac * (width - 1) as f64).round() as usize;
    let mut track = "━".repeat(pos);
    track.push('●');
    track.push_str(&"─".repeat(width - 1 - pos));
    track
}

/// Renders the sidebar for `view` into `area`.
pub fn render_picker(
    area: Rect,
    buf: &mut Buffer,
    view: &PanelView,
    state: &mut PickerState,
    theme: &Theme,
) {
    let palette = Palette::from_theme(theme);
    let focus = state.focus;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Distribution ");
    let inner = block.inner(area);
    block.render(area, buf);

    let param_rows = view.parameters.len() as u16 * 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(view.distributions.len() as u16), // Distribution list
            Constraint::Length(1),                                // Padding
            Constraint::Length(1),                                // Parameterization label
            Constraint::Length(1),                                // Parameterization radio
            Constraint::Length(1),                                // Padding
            Constraint::Length(param_rows),                       // Parameters
            Constraint::Length(1),                                // Padding
            Constraint::Length(1),                                // X limit toggle
            Constraint::Length(1),                                // X limit values
            Constraint::Length(1),                                // Y limit toggle
            Constraint::Length(1),                                // Y limit value
            Constraint::Fill(1),
        ])
        .split(inner);

    // Distribution list
    let list_focused = focus == PickerFocus::Distribution;
    let items: Vec<ListItem> = view
        .distributions
        .iter()
        .map(|id| {
            let selected = *id == view.selected;
            let marker = if selected { "● " } else { "○ " };
            let style = if selected && list_focused {
                Style::default().fg(palette.active).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(palette.border)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, id.label()),
                style,
            )))
        })
        .collect();
    StatefulWidget::render(List::new(items), rows[0], buf, &mut state.list_state);

    // Parameterization
    let p = &view.parameterization;
    let p_focused = focus == PickerFocus::Parameterization;
    Paragraph::new("Parameterization:")
        .style(palette.label(p_focused, p.enabled))
        .render(rows[2], buf);
    let radio: Vec<Span> = p
        .options
        .iter()
        .flat_map(|option| {
            let marker = if *option == p.selected { "●" } else { "○" };
            [
                Span::styled(
                    format!("{} {}", marker, option),
                    palette.label(p_focused && *option == p.selected, p.enabled),
                ),
                Span::raw("  "),
            ]
        })
        .collect();
    Paragraph::new(Line::from(radio)).render(rows[3], buf);

    // Parameters: label + value, then the slider track
    let param_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); view.parameters.len() * 2])
        .split(rows[5]);
    for (i, widget) in view.parameters.iter().enumerate() {
        let focused = focus == PickerFocus::Parameter(i);
        render_parameter(
            widget,
            focused,
            &palette,
            param_areas[i * 2],
            param_areas[i * 2 + 1],
            buf,
        );
    }

    render_limit(
        Axis::X,
        &view.x_limit,
        focus,
        &palette,
        rows[7],
        rows[8],
        buf,
    );
    render_limit(
        Axis::Y,
        &view.y_limit,
        focus,
        &palette,
        rows[9],
        rows[10],
        buf,
    );
}

fn render_parameter(
    widget: &ParameterWidget,
    focused: bool,
    palette: &Palette,
    label_area: Rect,
    track_area: Rect,
    buf: &mut Buffer,
) {
    let spec = &widget.spec;
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)])
        .split(label_area);
    Paragraph::new(format!("{} ({})", spec.label, spec.name))
        .style(palette.label(focused, true))
        .render(row[0], buf);
    let value = match widget.value {
        Some(v) => format!("{:.2}", v),
        None => "(empty)".to_string(),
    };
    let value_color = if focused { palette.value } else { palette.text };
    Paragraph::new(value)
        .style(Style::default().fg(value_color))
        .right_aligned()
        .render(row[1], buf);

    let track = slider_track(widget.value, spec.min, spec.max, track_area.width as usize);
    let track_style = if focused {
        Style::default().fg(palette.active)
    } else {
        Style::default().fg(palette.dimmed)
    };
    Paragraph::new(track)
        .style(track_style)
        .render(track_area, buf);
}

fn render_limit(
    axis: Axis,
    control: &LimitControl,
    focus: PickerFocus,
    palette: &Palette,
    toggle_area: Rect,
    values_area: Rect,
    buf: &mut Buffer,
) {
    let toggle_focused = focus == PickerFocus::LimitToggle(axis);
    let title = match axis {
        Axis::X => "Custom X limits:",
        Axis::Y => "Custom Y limit:",
    };
    let checkbox = if control.enabled { "☑" } else { "☐" };
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH + 4), Constraint::Length(2)])
        .split(toggle_area);
    Paragraph::new(title)
        .style(palette.label(toggle_focused, control.available))
        .render(row[0], buf);
    Paragraph::new(checkbox)
        .style(palette.label(toggle_focused, control.available))
        .render(row[1], buf);

    // Values are dimmed until the limit is switched on
    let active = control.available && control.enabled;
    let mut spans = Vec::new();
    if let Some(min) = control.min {
        let focused = focus == PickerFocus::LimitValue(axis, Bound::Min);
        spans.push(Span::styled(
            format!("  min {:.2}", min),
            palette.label(focused, active || (focused && control.available)),
        ));
    }
    let focused = focus == PickerFocus::LimitValue(axis, Bound::Max);
    spans.push(Span::styled(
        format!("  max {:.2}", control.max),
        palette.label(focused, active || (focused && control.available)),
    ));
    Paragraph::new(Line::from(spans)).render(values_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;

    #[test]
    fn slider_track_positions_knob() {
        assert_eq!(slider_track(Some(0.0), 0.0, 1.0, 5), "●────");
        assert_eq!(slider_track(Some(1.0), 0.0, 1.0, 5), "━━━━●");
        assert_eq!(slider_track(Some(0.5), 0.0, 1.0, 5), "━━●──");
        assert_eq!(slider_track(None, 0.0, 1.0, 3), "───");
        assert_eq!(slider_track(Some(9.0), 0.0, 1.0, 0), "");
    }

    #[test]
    fn renders_selected_distribution_and_parameters() {
        let controller = Controller::new();
        let view = controller.view();
        let mut state = PickerState::new();
        let area = Rect::new(0, 0, 36, 30);
        let mut buf = Buffer::empty(area);
        render_picker(area, &mut buf, &view, &mut state, &Theme::default());

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("● Beta"));
        assert!(text.contains("○ Normal"));
        assert!(text.contains("α (a)"));
        assert!(text.contains("1.50"));
        assert!(text.contains("Custom X limits:"));
    }

    #[test]
    fn focused_value_uses_primary_color() {
        let controller = Controller::new();
        let view = controller.view();
        let mut state = PickerState::new();
        state.focus = PickerFocus::Parameter(0);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 36, 30);
        let mut buf = Buffer::empty(area);
        render_picker(area, &mut buf, &view, &mut state, &theme);

        // Border, ten list rows, then four label/padding rows before the parameters
        let row = 15;
        let value_fg: Vec<Color> = (1..35)
            .filter(|&x| buf[(x, row)].symbol() == "5")
            .map(|x| buf[(x, row)].fg)
            .collect();
        assert_eq!(value_fg, vec![theme.get("primary")]);

        let other_row = 17;
        let other_fg: Vec<Color> = (1..35)
            .filter(|&x| buf[(x, other_row)].symbol() == "5")
            .map(|x| buf[(x, other_row)].fg)
            .collect();
        assert_eq!(other_fg, vec![theme.get("text_primary")]);
    }
}
