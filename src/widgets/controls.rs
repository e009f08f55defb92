use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Paragraph, Widget},
};

use crate::picker::StatusKind;

const CONTROLS: [(&str, &str); 9] = [
    ("Tab", "Focus"),
    ("←→", "Adjust"),
    ("Spc", "Toggle"),
    ("Del", "Clear"),
    ("r", "Reset"),
    ("p", "PNG"),
    ("e", "EPS"),
    ("Enter", "Confirm"),
    ("Esc", "Cancel"),
];

/// Key hint bar with the status message right-aligned.
pub struct Controls<'a> {
    pub status: Option<&'a (StatusKind, String)>,
    /// When false only the status message is drawn.
    pub show_hints: bool,
    pub background: Color,
    pub error: Color,
    pub info: Color,
}

impl<'a> Controls<'a> {
    pub fn new(status: Option<&'a (StatusKind, String)>) -> Self {
        Self {
            status,
            show_hints: true,
            background: Color::DarkGray,
            error: Color::Red,
            info: Color::Yellow,
        }
    }

    pub fn with_hints(mut self, show_hints: bool) -> Self {
        self.show_hints = show_hints;
        self
    }

    pub fn with_colors(mut self, background: Color, error: Color, info: Color) -> Self {
        self.background = background;
        self.error = error;
        self.info = info;
        self
    }
}

impl Widget for &Controls<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints: &[(&str, &str)] = if self.show_hints { &CONTROLS } else { &[] };
        let mut constraints = hints.iter().fold(vec![], |mut acc, (key, action)| {
            acc.push(Constraint::Length(key.chars().count() as u16 + 2));
            acc.push(Constraint::Length(action.chars().count() as u16 + 1));
            acc
        });
        constraints.push(Constraint::Fill(1));

        let layout = Layout::new(Direction::Horizontal, constraints).split(area);
        let base_style = Style::default();

        for (i, (key, action)) in hints.iter().enumerate() {
            let j = i * 2;
            Paragraph::new(*key)
                .style(base_style.bold())
                .centered()
                .render(layout[j], buf);
            Paragraph::new(*action)
                .style(base_style.bg(self.background))
                .render(layout[j + 1], buf);
        }

        let (text, style) = match self.status {
            Some((StatusKind::Error, message)) => {
                (message.as_str(), base_style.bg(self.background).fg(self.error))
            }
            Some((StatusKind::Info, message)) => {
                (message.as_str(), base_style.bg(self.background).fg(self.info))
            }
            None => ("", base_style.bg(self.background)),
        };
        Paragraph::new(text)
            .style(style)
            .right_aligned()
            .render(layout[hints.len() * 2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(controls: &Controls) -> String {
        let area = Rect::new(0, 0, 140, 1);
        let mut buf = Buffer::empty(area);
        controls.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_hints_and_status() {
        let status = (StatusKind::Error, "parameter 'a' has no value".to_string());
        let text = rendered(&Controls::new(Some(&status)));
        assert!(text.contains("Confirm"));
        assert!(text.trim_end().ends_with("parameter 'a' has no value"));
    }

    #[test]
    fn status_color_follows_kind() {
        let area = Rect::new(0, 0, 40, 1);
        let controls = |status: &(StatusKind, String)| {
            let mut buf = Buffer::empty(area);
            Controls::new(Some(status))
                .with_hints(false)
                .with_colors(Color::Black, Color::LightRed, Color::LightYellow)
                .render(area, &mut buf);
            buf[(39, 0)].fg
        };
        assert_eq!(controls(&(StatusKind::Info, "saved".to_string())), Color::LightYellow);
        assert_eq!(controls(&(StatusKind::Error, "failed".to_string())), Color::LightRed);
    }

    #[test]
    fn hints_can_be_hidden() {
        let text = rendered(&Controls::new(None).with_hints(false));
        assert!(!text.contains("Confirm"));
    }
}
