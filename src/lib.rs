use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::symbols::Marker;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub mod cache;
pub mod chart_export;
pub mod config;
pub mod controller;
pub mod density;
pub mod emitter;
pub mod error;
pub mod logging;
pub mod picker;
pub mod registry;
pub mod widgets;

pub use cache::CacheManager;
pub use chart_export::{ChartExportFormat, ExportSize};
pub use config::{
    rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, ConfigManager, Theme,
};
pub use controller::{Axis, Bound, Controller, Curve, DrawRequest, PanelView, SelectionState};
pub use distui_cli::{Args, OutputFormat};
pub use emitter::{confirm, ParameterMap};
pub use error::GadgetError;
pub use registry::{DistributionId, DistributionSpec, ParameterSpec, Parameterization};

use picker::{PickerFocus, PickerState, X_LIMIT_STEP, Y_LIMIT_STEP};
use widgets::controls::Controls;
use widgets::debug::DebugState;

/// Application name used for cache directory and other app-specific paths
pub const APP_NAME: &str = "distui";

#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Export(ChartExportFormat),
    /// The user confirmed; the session ends with this result.
    Confirmed(ParameterMap),
    Exit,
    Resize(u16, u16), // resized (width, height)
}

pub struct App {
    controller: Controller,
    pub picker: PickerState,
    events: Sender<AppEvent>,
    debug: DebugState,
    theme: Theme,
    marker: Marker,
    sidebar_width: u16,
    show_key_hints: bool,
    export_dir: PathBuf,
    export_size: ExportSize,
}

impl App {
    pub fn send_event(&mut self, event: AppEvent) -> Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    pub fn new(events: Sender<AppEvent>) -> App {
        let config = AppConfig::default();
        let theme = Theme::from_config(&config.theme).unwrap_or_default();
        Self::new_with_config(events, theme, &config)
    }

    pub fn new_with_config(events: Sender<AppEvent>, theme: Theme, app_config: &AppConfig) -> App {
        let mut picker = PickerState::new();
        let controller = Controller::new();
        picker.sync(&controller.view());

        App {
            controller,
            picker,
            events,
            debug: DebugState::default(),
            theme,
            marker: widgets::chart::marker_from_name(&app_config.display.marker),
            sidebar_width: app_config.display.sidebar_width,
            show_key_hints: app_config.display.show_key_hints,
            export_dir: app_config
                .export
                .directory
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            export_size: ExportSize {
                width: app_config.export.width,
                height: app_config.export.height,
            },
        }
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Export(format) => {
                self.export(*format);
                None
            }
            _ => None,
        }
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        self.debug.on_key(event);

        let view = self.controller.view();
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let steps = if shift { 10 } else { 1 };

        match event.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                tracing::info!("selection cancelled");
                return Some(AppEvent::Exit);
            }
            KeyCode::Enter => return self.confirm(),
            KeyCode::Char('p') => self.queue_export(ChartExportFormat::Png),
            KeyCode::Char('e') => self.queue_export(ChartExportFormat::Eps),
            KeyCode::Tab => self.picker.next_focus(&view),
            KeyCode::BackTab => self.picker.prev_focus(&view),
            KeyCode::Up | KeyCode::Char('k') => {
                if self.picker.focus == PickerFocus::Distribution {
                    self.move_distribution(-1);
                } else {
                    self.picker.prev_focus(&view);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.picker.focus == PickerFocus::Distribution {
                    self.move_distribution(1);
                } else {
                    self.picker.next_focus(&view);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.adjust(&view, -steps),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(&view, steps),
            KeyCode::Char('H') => self.adjust(&view, -10),
            KeyCode::Char('L') => self.adjust(&view, 10),
            KeyCode::Char(' ') => self.toggle(),
            KeyCode::Delete | KeyCode::Backspace => self.clear_focused(&view),
            KeyCode::Char('r') => {
                self.controller.reset_parameters();
                self.picker.set_info("Parameters reset to defaults");
                self.debug.on_action("reset");
            }
            _ => {}
        }

        self.picker.sync(&self.controller.view());
        None
    }

    fn apply(&mut self, result: error::Result<()>, action: String) {
        match result {
            Ok(()) => {
                self.picker.clear_status();
                self.debug.on_action(action);
            }
            Err(e) => {
                tracing::warn!(error = %e, "action rejected");
                self.picker.set_error(e.to_string());
            }
        }
    }

    fn move_distribution(&mut self, delta: isize) {
        let all = registry::list_distributions();
        let current = self.controller.state().distribution();
        let index = all.iter().position(|d| *d == current).unwrap_or(0) as isize;
        let next = (index + delta).clamp(0, all.len() as isize - 1) as usize;
        if all[next] != current {
            self.controller.on_distribution_changed(all[next]);
            self.picker.clear_status();
            self.debug.on_action(format!("distribution={}", all[next]));
        }
    }

    fn cycle_parameterization(&mut self) {
        let spec = self.controller.spec();
        let options: Vec<Parameterization> = spec.parameterizations().collect();
        let index = options
            .iter()
            .position(|p| *p == spec.parameterization())
            .unwrap_or(0);
        let next = options[(index + 1) % options.len()];
        let result = self.controller.on_parameterization_changed(next);
        self.apply(result, format!("parameterization={}", next));
    }

    fn adjust(&mut self, view: &PanelView, steps: i32) {
        match self.picker.focus {
            PickerFocus::Distribution => self.move_distribution(steps.signum() as isize),
            PickerFocus::Parameterization => self.cycle_parameterization(),
            PickerFocus::Parameter(i) => {
                let Some(widget) = view.parameters.get(i) else {
                    return;
                };
                let current = widget.value.unwrap_or(widget.spec.default);
                let value = widget.spec.step_by(current, steps);
                let result = self
                    .controller
                    .on_parameter_value_changed(widget.spec.name, value);
                self.apply(result, format!("{}={}", widget.spec.name, value));
            }
            PickerFocus::LimitToggle(_) => self.toggle(),
            PickerFocus::LimitValue(axis, bound) => {
                let state = self.controller.state();
                let (current, step) = match (axis, bound) {
                    (Axis::X, Bound::Min) => (state.x_limits().0, X_LIMIT_STEP),
                    (Axis::X, Bound::Max) => (state.x_limits().1, X_LIMIT_STEP),
                    (Axis::Y, _) => (state.y_limit_max(), Y_LIMIT_STEP),
                };
                let value = ((current + step * steps as f64) / step).round() * step;
                let result = self
                    .controller
                    .on_limit_value_changed(axis, bound, value)
                    .map(|_| ());
                self.apply(result, format!("{}_{}={}", axis, bound, value));
            }
        }
    }

    fn toggle(&mut self) {
        match self.picker.focus {
            PickerFocus::LimitToggle(axis) => {
                let state = self.controller.state();
                let enabled = match axis {
                    Axis::X => !state.x_limit_enabled(),
                    Axis::Y => !state.y_limit_enabled(),
                };
                if self.controller.on_limit_toggle(axis, enabled) {
                    self.picker.clear_status();
                    self.debug.on_action(format!("{}_limit={}", axis, enabled));
                } else {
                    self.picker
                        .set_error(format!("Custom {} limit is not available", axis));
                }
            }
            PickerFocus::Parameterization => self.cycle_parameterization(),
            _ => {}
        }
    }

    fn clear_focused(&mut self, view: &PanelView) {
        if let PickerFocus::Parameter(i) = self.picker.focus {
            if let Some(widget) = view.parameters.get(i) {
                let result = self.controller.on_parameter_cleared(widget.spec.name);
                self.apply(result, format!("{}=<empty>", widget.spec.name));
            }
        }
    }

    fn confirm(&mut self) -> Option<AppEvent> {
        match emitter::confirm(self.controller.state()) {
            Ok(result) => Some(AppEvent::Confirmed(result)),
            Err(e) => {
                tracing::warn!(error = %e, "confirmation blocked");
                self.picker.set_error(e.to_string());
                None
            }
        }
    }

    /// Exports run on the next loop iteration so the status line is drawn first.
    fn queue_export(&mut self, format: ChartExportFormat) {
        self.picker
            .set_info(format!("Exporting {}...", format.as_str()));
        if let Err(e) = self.send_event(AppEvent::Export(format)) {
            self.picker
                .set_error(format!("{} export failed: {}", format.as_str(), e));
        }
    }

    fn export(&mut self, format: ChartExportFormat) {
        let request = match self.controller.draw_request() {
            Ok(request) => request,
            Err(e) => {
                self.picker
                    .set_error(format!("{} export failed: {}", format.as_str(), e));
                return;
            }
        };
        match chart_export::export_chart(&self.export_dir, &request, format, self.export_size) {
            Ok(path) => self.picker.set_info(format!("Wrote {}", path.display())),
            Err(e) => {
                tracing::error!(error = %e, "chart export failed");
                self.picker
                    .set_error(format!("{} export failed: {}", format.as_str(), e));
            }
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;

        let mut constraints = vec![Constraint::Fill(1), Constraint::Length(1)];
        if self.debug.enabled {
            constraints.push(Constraint::Length(1));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.sidebar_width), Constraint::Fill(1)])
            .split(layout[0]);

        let view = self.controller.view();
        widgets::picker::render_picker(main[0], buf, &view, &mut self.picker, &self.theme);

        let request = self.controller.draw_request();
        widgets::chart::render_density_chart(
            main[1],
            buf,
            request.as_ref(),
            self.marker,
            &self.theme,
        );

        Controls::new(self.picker.status.as_ref())
            .with_hints(self.show_key_hints)
            .with_colors(
                self.theme.get("controls_bg"),
                self.theme.get("error"),
                self.theme.get("secondary"),
            )
            .render(layout[1], buf);

        if self.debug.enabled {
            (&self.debug).render(layout[2], buf);
        }
    }
}
