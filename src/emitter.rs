//! Result emitter: turns the confirmed selection into the gadget's output.

use std::fmt;

use distui_cli::OutputFormat;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::controller::SelectionState;
use crate::error::{GadgetError, Result};

/// Ordered output-name → value mapping. Keys keep the distribution's output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    entries: Vec<(&'static str, f64)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: f64) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render for stdout in the requested format.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            // Serializing a map of f64 cannot fail; non-finite values become null.
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
            OutputFormat::Text => self.to_string(),
        }
    }
}

impl FromIterator<(&'static str, f64)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (&'static str, f64)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for ParameterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}

/// Map the current widget values to the distribution's canonical output names.
///
/// Every parameter of the active spec must have a value; a missing one is a
/// blocking precondition, never replaced by its default. The state is only read.
pub fn confirm(state: &SelectionState) -> Result<ParameterMap> {
    let spec = state.spec();
    let raw = state
        .param_values()
        .complete()
        .map_err(|name| GadgetError::IncompleteSelection(name.to_string()))?;
    let result = spec.output_mapping(&raw);
    tracing::info!(
        distribution = %spec.id(),
        parameterization = %spec.parameterization(),
        result = %result.render(OutputFormat::Json),
        "selection confirmed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParameterMap {
        [("shape1", 1.5), ("shape2", 2.0)].into_iter().collect()
    }

    #[test]
    fn json_keeps_insertion_order() {
        let map: ParameterMap = [("std.dev", 1.0), ("mean", 0.0)].into_iter().collect();
        assert_eq!(map.render(OutputFormat::Json), r#"{"std.dev":1.0,"mean":0.0}"#);
    }

    #[test]
    fn text_one_line_per_parameter() {
        assert_eq!(sample().render(OutputFormat::Text), "shape1 = 1.5\nshape2 = 2");
    }

    #[test]
    fn insert_replaces_existing() {
        let mut map = sample();
        map.insert("shape1", 4.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("shape1"), Some(4.0));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["shape1", "shape2"]);
    }
}
