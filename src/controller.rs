//! Reactive controller: owns the selection state and derives what the shell shows.
//!
//! Each `on_*` handler applies one user action atomically. It either updates
//! the state completely or returns an error and leaves it untouched. Derived
//! outputs ([`PanelView`], [`Curve`], [`DrawRequest`]) are pure functions of
//! the state, so the same selection always renders the same widget set.

use std::fmt;

use crate::density::DensityFn;
use crate::error::{GadgetError, Result};
use crate::registry::{
    self, DistributionId, DistributionSpec, ParameterSpec, Parameterization, WEIBULL_X_EPSILON,
};

/// Plot axis a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// Which end of an axis range a limit value sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    Min,
    Max,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bound::Min => "min",
            Bound::Max => "max",
        })
    }
}

/// Current parameter values, keyed by the active spec's parameter names in widget order.
/// `None` means the host reported the input as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValues {
    entries: Vec<(&'static str, Option<f64>)>,
}

impl ParameterValues {
    fn defaults(spec: &DistributionSpec) -> Self {
        Self {
            entries: spec
                .parameters()
                .iter()
                .map(|p| (p.name, Some(p.default)))
                .collect(),
        }
    }

    /// `None` when `name` is not a parameter; `Some(None)` when it has no value.
    pub fn get(&self, name: &str) -> Option<Option<f64>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All values in widget order, or the name of the first missing one.
    pub fn complete(&self) -> std::result::Result<Vec<f64>, &'static str> {
        self.entries
            .iter()
            .map(|(name, value)| value.ok_or(*name))
            .collect()
    }

    fn set(&mut self, name: &str, value: Option<f64>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        }
    }
}

/// Everything the user has selected in this session.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    spec: DistributionSpec,
    param_values: ParameterValues,
    x_limit_enabled: bool,
    x_limit_min: f64,
    x_limit_max: f64,
    y_limit_enabled: bool,
    y_limit_max: f64,
}

impl SelectionState {
    /// Beta/Classic with default values, limits off.
    pub fn new() -> Self {
        let spec = registry::default_spec(DistributionId::Beta);
        Self {
            spec,
            param_values: ParameterValues::defaults(&spec),
            x_limit_enabled: false,
            x_limit_min: 0.0,
            x_limit_max: 10.0,
            y_limit_enabled: false,
            y_limit_max: 1.0,
        }
    }

    pub fn spec(&self) -> DistributionSpec {
        self.spec
    }

    pub fn distribution(&self) -> DistributionId {
        self.spec.id()
    }

    pub fn parameterization(&self) -> Parameterization {
        self.spec.parameterization()
    }

    pub fn param_values(&self) -> &ParameterValues {
        &self.param_values
    }

    pub fn x_limit_enabled(&self) -> bool {
        self.x_limit_enabled
    }

    pub fn x_limits(&self) -> (f64, f64) {
        (self.x_limit_min, self.x_limit_max)
    }

    pub fn y_limit_enabled(&self) -> bool {
        self.y_limit_enabled
    }

    pub fn y_limit_max(&self) -> f64 {
        self.y_limit_max
    }

    fn limit_available(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.spec.supports_custom_x_limits(),
            Axis::Y => self.spec.supports_custom_y_limit(),
        }
    }

    /// Re-establish the per-distribution invariants after a distribution change.
    fn enforce_distribution_rules(&mut self) {
        if !self.spec.supports_custom_x_limits() {
            self.x_limit_enabled = false;
        }
        if !self.spec.supports_custom_y_limit() {
            self.y_limit_enabled = false;
        }
        if self.spec.id() == DistributionId::Weibull {
            self.x_limit_min = self.x_limit_min.max(WEIBULL_X_EPSILON);
            if self.x_limit_max <= self.x_limit_min {
                (self.x_limit_min, self.x_limit_max) = self.spec.default_x_range();
            }
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the parameterization selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterizationControl {
    pub enabled: bool,
    pub options: Vec<Parameterization>,
    pub selected: Parameterization,
}

/// One parameter widget: its spec and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterWidget {
    pub spec: ParameterSpec,
    pub value: Option<f64>,
}

/// State of a limit checkbox and its value inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitControl {
    /// False when the distribution does not offer this limit (control disabled).
    pub available: bool,
    pub enabled: bool,
    /// `None` for the Y axis, which only has an upper limit.
    pub min: Option<f64>,
    pub max: f64,
}

/// Derived widget panel for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub distributions: &'static [DistributionId],
    pub selected: DistributionId,
    pub parameterization: ParameterizationControl,
    pub parameters: Vec<ParameterWidget>,
    pub x_limit: LimitControl,
    pub y_limit: LimitControl,
}

/// Lazily sampled density over a closed X range. Iterate as often as needed.
#[derive(Debug, Clone)]
pub struct Curve {
    density: DensityFn,
    args: Vec<f64>,
    x_min: f64,
    x_max: f64,
    samples: usize,
}

impl Curve {
    pub fn iter(&self) -> CurveIter<'_> {
        CurveIter {
            curve: self,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    fn x_at(&self, index: usize) -> f64 {
        if self.samples < 2 {
            return self.x_min;
        }
        if index + 1 == self.samples {
            return self.x_max;
        }
        self.x_min + (self.x_max - self.x_min) * index as f64 / (self.samples - 1) as f64
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = (f64, f64);
    type IntoIter = CurveIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct CurveIter<'a> {
    curve: &'a Curve,
    index: usize,
}

impl Iterator for CurveIter<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.curve.samples {
            return None;
        }
        let x = self.curve.x_at(self.index);
        self.index += 1;
        Some((x, (self.curve.density)(x, &self.curve.args)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.curve.samples - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveIter<'_> {}

/// What the rendering layer needs to draw the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    /// Finite samples only; poles and NaNs are skipped.
    pub points: Vec<(f64, f64)>,
    pub x_range: (f64, f64),
    /// Fixed upper Y bound, or `None` to auto-scale.
    pub y_max: Option<f64>,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl DrawRequest {
    /// Y bounds for drawing: from 0 to the fixed limit, else to the highest sample.
    pub fn y_range(&self) -> (f64, f64) {
        let top = self.y_max.unwrap_or_else(|| {
            let highest = self
                .points
                .iter()
                .map(|&(_, y)| y)
                .fold(f64::NEG_INFINITY, f64::max);
            if highest > 0.0 {
                highest * 1.05
            } else {
                1.0
            }
        });
        (0.0, top)
    }
}

/// Owns the session's [`SelectionState`] and applies user actions to it.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: SelectionState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn spec(&self) -> DistributionSpec {
        self.state.spec
    }

    /// Select a distribution: first variant, default values, forced toggles re-applied.
    pub fn on_distribution_changed(&mut self, id: DistributionId) {
        let spec = registry::default_spec(id);
        self.state.spec = spec;
        self.state.param_values = ParameterValues::defaults(&spec);
        if let Some((_, y_max)) = spec.default_y_range() {
            if spec.supports_custom_y_limit() {
                self.state.y_limit_max = y_max;
            }
        }
        self.state.enforce_distribution_rules();
        tracing::debug!(distribution = %id, "distribution changed");
    }

    pub fn on_parameterization_changed(&mut self, parameterization: Parameterization) -> Result<()> {
        let current = self.state.spec;
        if !current.supports_parameterization_choice()
            || !current.supports_parameterization(parameterization)
        {
            return Err(GadgetError::InvalidParameterization {
                distribution: current.id(),
                parameterization,
            });
        }
        let spec = registry::get_spec(current.id(), parameterization)?;
        self.state.spec = spec;
        self.state.param_values = ParameterValues::defaults(&spec);
        tracing::debug!(
            distribution = %spec.id(),
            parameterization = %parameterization,
            "parameterization changed"
        );
        Ok(())
    }

    pub fn on_parameter_value_changed(&mut self, name: &str, value: f64) -> Result<()> {
        let spec = self
            .state
            .spec
            .parameter(name)
            .ok_or_else(|| GadgetError::UnknownParameter(name.to_string()))?;
        if !spec.contains(value) {
            return Err(GadgetError::OutOfRange {
                name: name.to_string(),
                value,
                min: spec.min,
                max: spec.max,
            });
        }
        self.state.param_values.set(name, Some(value));
        tracing::trace!(parameter = name, value, "parameter changed");
        Ok(())
    }

    /// The host reports the input for `name` as empty.
    pub fn on_parameter_cleared(&mut self, name: &str) -> Result<()> {
        if self.state.spec.parameter(name).is_none() {
            return Err(GadgetError::UnknownParameter(name.to_string()));
        }
        self.state.param_values.set(name, None);
        tracing::trace!(parameter = name, "parameter cleared");
        Ok(())
    }

    /// Restore every parameter of the active variant to its default.
    pub fn reset_parameters(&mut self) {
        self.state.param_values = ParameterValues::defaults(&self.state.spec);
    }

    /// Returns false (and changes nothing) when the toggle is disabled for this distribution.
    pub fn on_limit_toggle(&mut self, axis: Axis, enabled: bool) -> bool {
        if !self.state.limit_available(axis) {
            tracing::trace!(%axis, "limit toggle ignored: not offered");
            return false;
        }
        match axis {
            Axis::X => self.state.x_limit_enabled = enabled,
            Axis::Y => self.state.y_limit_enabled = enabled,
        }
        true
    }

    /// Returns `Ok(false)` when the control is disabled or the axis has no such bound.
    pub fn on_limit_value_changed(&mut self, axis: Axis, bound: Bound, value: f64) -> Result<bool> {
        if !self.state.limit_available(axis) || (axis, bound) == (Axis::Y, Bound::Min) {
            return Ok(false);
        }
        let invalid = || GadgetError::InvalidLimit { axis, bound, value };
        if !value.is_finite() {
            return Err(invalid());
        }
        match (axis, bound) {
            (Axis::X, Bound::Min) => {
                let value = if self.state.distribution() == DistributionId::Weibull {
                    value.max(WEIBULL_X_EPSILON)
                } else {
                    value
                };
                if value >= self.state.x_limit_max {
                    return Err(invalid());
                }
                self.state.x_limit_min = value;
            }
            (Axis::X, Bound::Max) => {
                if value <= self.state.x_limit_min {
                    return Err(invalid());
                }
                self.state.x_limit_max = value;
            }
            (Axis::Y, Bound::Max) => {
                if value <= 0.0 {
                    return Err(invalid());
                }
                self.state.y_limit_max = value;
            }
            (Axis::Y, Bound::Min) => return Ok(false),
        }
        Ok(true)
    }

    /// Custom X limits when enabled, else the distribution's default range.
    pub fn effective_x_range(&self) -> (f64, f64) {
        let state = &self.state;
        if state.x_limit_enabled && state.spec.supports_custom_x_limits() {
            (state.x_limit_min, state.x_limit_max)
        } else {
            state.spec.default_x_range()
        }
    }

    /// Custom Y bound when enabled and offered; `None` means auto-scale.
    pub fn effective_y_max(&self) -> Option<f64> {
        let state = &self.state;
        (state.y_limit_enabled && state.spec.supports_custom_y_limit()).then_some(state.y_limit_max)
    }

    /// The density to plot. Fails while any parameter has no value.
    pub fn current_curve(&self) -> Result<Curve> {
        let raw = self
            .state
            .param_values
            .complete()
            .map_err(|name| GadgetError::IncompleteSelection(name.to_string()))?;
        let (density, args) = self.state.spec.density_with(&raw);
        let (x_min, x_max) = self.effective_x_range();
        Ok(Curve {
            density,
            args,
            x_min,
            x_max,
            samples: self.state.spec.sample_count(),
        })
    }

    pub fn draw_request(&self) -> Result<DrawRequest> {
        let curve = self.current_curve()?;
        let raw = self
            .state
            .param_values
            .complete()
            .map_err(|name| GadgetError::IncompleteSelection(name.to_string()))?;
        let points: Vec<(f64, f64)> = curve.iter().filter(|(_, y)| y.is_finite()).collect();
        Ok(DrawRequest {
            points,
            x_range: curve.x_range(),
            y_max: self.effective_y_max(),
            title: self.state.spec.title(&raw),
            x_label: "x",
            y_label: "density",
        })
    }

    pub fn view(&self) -> PanelView {
        let state = &self.state;
        let spec = state.spec;
        PanelView {
            distributions: registry::list_distributions(),
            selected: spec.id(),
            parameterization: ParameterizationControl {
                enabled: spec.supports_parameterization_choice(),
                options: Parameterization::ALL.to_vec(),
                selected: spec.parameterization(),
            },
            parameters: spec
                .parameters()
                .iter()
                .map(|p| ParameterWidget {
                    spec: *p,
                    value: state.param_values.get(p.name).flatten(),
                })
                .collect(),
            x_limit: LimitControl {
                available: spec.supports_custom_x_limits(),
                enabled: state.x_limit_enabled,
                min: Some(state.x_limit_min),
                max: state.x_limit_max,
            },
            y_limit: LimitControl {
                available: spec.supports_custom_y_limit(),
                enabled: state.y_limit_enabled,
                min: None,
                max: state.y_limit_max,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_beta_classic() {
        let controller = Controller::new();
        let state = controller.state();
        assert_eq!(state.distribution(), DistributionId::Beta);
        assert_eq!(state.parameterization(), Parameterization::Classic);
        assert_eq!(state.param_values().names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!state.x_limit_enabled());
        assert!(!state.y_limit_enabled());
    }

    #[test]
    fn curve_is_restartable() {
        let controller = Controller::new();
        let curve = controller.current_curve().unwrap();
        assert_eq!(curve.len(), 201);
        assert_eq!(curve.iter().len(), 201);
        let first: Vec<(f64, f64)> = curve.iter().collect();
        let second: Vec<(f64, f64)> = (&curve).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first[0].0, 0.0);
        assert_eq!(first[200].0, 1.0);
    }

    #[test]
    fn limit_toggle_ignored_on_beta() {
        let mut controller = Controller::new();
        assert!(!controller.on_limit_toggle(Axis::X, true));
        assert!(!controller.on_limit_toggle(Axis::Y, true));
        assert!(!controller.state().x_limit_enabled());
        assert_eq!(controller.on_limit_value_changed(Axis::X, Bound::Min, 0.5), Ok(false));
    }

    #[test]
    fn weibull_clamps_x_min() {
        let mut controller = Controller::new();
        controller.on_distribution_changed(DistributionId::Weibull);
        assert_eq!(controller.state().x_limits().0, WEIBULL_X_EPSILON);
        assert_eq!(controller.on_limit_value_changed(Axis::X, Bound::Min, 0.0), Ok(true));
        assert_eq!(controller.state().x_limits().0, WEIBULL_X_EPSILON);
        assert!(controller.on_limit_toggle(Axis::X, true));
        assert_eq!(controller.effective_x_range().0, WEIBULL_X_EPSILON);
    }

    #[test]
    fn crossing_limits_rejected() {
        let mut controller = Controller::new();
        controller.on_distribution_changed(DistributionId::Normal);
        let before = controller.state().clone();
        assert!(matches!(
            controller.on_limit_value_changed(Axis::X, Bound::Max, -1.0),
            Err(GadgetError::InvalidLimit { .. })
        ));
        assert!(matches!(
            controller.on_limit_value_changed(Axis::X, Bound::Min, f64::NAN),
            Err(GadgetError::InvalidLimit { .. })
        ));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn y_limit_only_has_max() {
        let mut controller = Controller::new();
        controller.on_distribution_changed(DistributionId::StudentT);
        assert_eq!(controller.state().y_limit_max(), 0.5);
        assert_eq!(controller.on_limit_value_changed(Axis::Y, Bound::Min, 0.1), Ok(false));
        assert_eq!(controller.on_limit_value_changed(Axis::Y, Bound::Max, 0.3), Ok(true));
        assert!(controller.on_limit_toggle(Axis::Y, true));
        assert_eq!(controller.effective_y_max(), Some(0.3));
        assert!(matches!(
            controller.on_limit_value_changed(Axis::Y, Bound::Max, 0.0),
            Err(GadgetError::InvalidLimit { .. })
        ));
    }
}
