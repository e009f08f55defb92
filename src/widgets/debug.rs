use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

#[derive(Default)]
pub struct DebugState {
    pub num_events: usize,
    pub num_frames: usize,
    pub num_key_events: usize,
    pub last_key_event_name: String,
    /// Last controller action taken (e.g. "distribution=Normal").
    pub last_action: String,
    pub enabled: bool,
}

impl DebugState {
    pub fn on_key(&mut self, event: &crossterm::event::KeyEvent) {
        self.num_key_events += 1;
        self.last_key_event_name = format!("{:?}", event.code);
    }

    pub fn on_action(&mut self, action: impl Into<String>) {
        self.last_action = action.into();
    }
}

impl Widget for &DebugState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!(
            "events={} keys={} last_key={} last_action={} frames={}",
            self.num_events,
            self.num_key_events,
            self.last_key_event_name,
            self.last_action,
            self.num_frames,
        ))
        .render(area, buf);
    }
}
