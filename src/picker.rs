//! Picker sidebar state: which control has focus and the last status message.

use ratatui::widgets::ListState;

use crate::controller::{Axis, Bound, PanelView};

/// X limit values move by this much per step.
pub const X_LIMIT_STEP: f64 = 0.5;
/// The Y limit moves by this much per step.
pub const Y_LIMIT_STEP: f64 = 0.05;

/// Focusable control in the picker sidebar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PickerFocus {
    #[default]
    Distribution,
    Parameterization,
    /// Index into the active distribution's parameter list.
    Parameter(usize),
    LimitToggle(Axis),
    LimitValue(Axis, Bound),
}

impl PickerFocus {
    /// Focus order for `view`; disabled controls are skipped.
    pub fn order(view: &PanelView) -> Vec<PickerFocus> {
        let mut order = vec![PickerFocus::Distribution];
        if view.parameterization.enabled {
            order.push(PickerFocus::Parameterization);
        }
        order.extend((0..view.parameters.len()).map(PickerFocus::Parameter));
        if view.x_limit.available {
            order.push(PickerFocus::LimitToggle(Axis::X));
            order.push(PickerFocus::LimitValue(Axis::X, Bound::Min));
            order.push(PickerFocus::LimitValue(Axis::X, Bound::Max));
        }
        if view.y_limit.available {
            order.push(PickerFocus::LimitToggle(Axis::Y));
            order.push(PickerFocus::LimitValue(Axis::Y, Bound::Max));
        }
        order
    }
}

/// Severity of the status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Default)]
pub struct PickerState {
    pub focus: PickerFocus,
    /// Highlighted row of the distribution list.
    pub list_state: ListState,
    pub status: Option<(StatusKind, String)>,
}

impl PickerState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default().with_selected(Some(0)),
            ..Self::default()
        }
    }

    pub fn next_focus(&mut self, view: &PanelView) {
        self.step_focus(view, 1);
    }

    pub fn prev_focus(&mut self, view: &PanelView) {
        self.step_focus(view, -1);
    }

    fn step_focus(&mut self, view: &PanelView, delta: isize) {
        let order = PickerFocus::order(view);
        let len = order.len() as isize;
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = order[(pos + delta).rem_euclid(len) as usize];
    }

    /// Keep focus on a control that still exists after the panel changed.
    pub fn sync(&mut self, view: &PanelView) {
        if !PickerFocus::order(view).contains(&self.focus) {
            self.focus = match self.focus {
                PickerFocus::Parameter(_) if !view.parameters.is_empty() => {
                    PickerFocus::Parameter(view.parameters.len() - 1)
                }
                _ => PickerFocus::Distribution,
            };
        }
        let selected = view.distributions.iter().position(|d| *d == view.selected);
        self.list_state.select(selected);
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some((StatusKind::Info, message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some((StatusKind::Error, message.into()));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
