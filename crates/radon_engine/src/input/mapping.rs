//! Virtual-axis mappings
//!
//! A mapping is a named set of virtual axes. Each axis fuses an optional
//! gamepad axis, an optional gamepad button and two keyboard key sets into a
//! single number, recomputed in place by the [`InputManager`](super::InputManager).

use serde::{Deserialize, Serialize};

/// Sources feeding one virtual axis
///
/// Absent sources contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisDef {
    /// Axis name, unique within its mapping
    pub name: String,
    /// Continuous gamepad axis index
    pub gamepad_axis: Option<usize>,
    /// Negate the gamepad axis reading
    pub invert_axis: bool,
    /// Gamepad button index; its 0/1 state overrides the gamepad axis
    pub gamepad_button: Option<usize>,
    /// Keys that subtract 1 while held; only the first held key counts
    pub decrement: Vec<String>,
    /// Keys that add 1 while held; only the first held key counts
    pub increment: Vec<String>,
}

impl AxisDef {
    /// Axis with no sources
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read a gamepad axis, optionally negated
    #[must_use]
    pub const fn with_gamepad_axis(mut self, axis: usize, invert: bool) -> Self {
        self.gamepad_axis = Some(axis);
        self.invert_axis = invert;
        self
    }

    /// Read a gamepad button as 0/1
    #[must_use]
    pub const fn with_gamepad_button(mut self, button: usize) -> Self {
        self.gamepad_button = Some(button);
        self
    }

    /// Keys that push the axis down and up
    #[must_use]
    pub fn with_keys<D, I>(mut self, decrement: D, increment: I) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.decrement = decrement.into_iter().map(Into::into).collect();
        self.increment = increment.into_iter().map(Into::into).collect();
        self
    }
}

/// Definition of a mapping: its axes in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputMappingDef {
    /// Optional label used in logs
    pub name: Option<String>,
    /// Axes, evaluated in declaration order
    pub axes: Vec<AxisDef>,
}

impl InputMappingDef {
    /// Empty definition with a label
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            axes: Vec::new(),
        }
    }

    /// Append an axis
    #[must_use]
    pub fn axis(mut self, axis: AxisDef) -> Self {
        self.axes.push(axis);
        self
    }
}

/// Index of a mapping inside its input manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingHandle(pub(crate) usize);

/// A live mapping holding the current value of every axis
#[derive(Debug, Clone)]
pub struct InputMapping {
    def: InputMappingDef,
    values: Vec<f32>,
}

impl InputMapping {
    pub(crate) fn new(def: InputMappingDef) -> Self {
        let values = vec![0.0; def.axes.len()];
        Self { def, values }
    }

    /// Definition this mapping was created from
    #[must_use]
    pub const fn def(&self) -> &InputMappingDef {
        &self.def
    }

    /// Current value of the named axis; 0 for an unknown name
    #[must_use]
    pub fn value(&self, axis: &str) -> f32 {
        self.def
            .axes
            .iter()
            .position(|a| a.name == axis)
            .map_or(0.0, |i| self.values[i])
    }

    /// `(name, value)` for every axis in declaration order
    pub fn values(&self) -> impl Iterator<Item = (&str, f32)> {
        self.def
            .axes
            .iter()
            .zip(&self.values)
            .map(|(a, &v)| (a.name.as_str(), v))
    }

    pub(crate) fn recompute(&mut self, sources: &dyn AxisSources) {
        for (axis, value) in self.def.axes.iter().zip(self.values.iter_mut()) {
            *value = evaluate(axis, sources);
        }
    }
}

/// Raw input readings consulted during recompute
pub(crate) trait AxisSources {
    fn key_down(&self, key: &str) -> bool;
    fn gamepad_axis(&self, axis: usize) -> f32;
    fn gamepad_button(&self, button: usize) -> bool;
}

fn evaluate(axis: &AxisDef, sources: &dyn AxisSources) -> f32 {
    let mut value = 0.0;
    if let Some(index) = axis.gamepad_axis {
        value = sources.gamepad_axis(index);
        if axis.invert_axis {
            value = -value;
        }
    }
    if let Some(button) = axis.gamepad_button {
        value = if sources.gamepad_button(button) { 1.0 } else { 0.0 };
    }
    if axis.decrement.iter().any(|k| sources.key_down(k)) {
        value -= 1.0;
    }
    if axis.increment.iter().any(|k| sources.key_down(k)) {
        value += 1.0;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Fake {
        keys: HashSet<&'static str>,
        axis: f32,
        button: bool,
    }

    impl AxisSources for Fake {
        fn key_down(&self, key: &str) -> bool {
            self.keys.contains(key)
        }
        fn gamepad_axis(&self, _axis: usize) -> f32 {
            self.axis
        }
        fn gamepad_button(&self, _button: usize) -> bool {
            self.button
        }
    }

    #[test]
    fn one_step_per_key_set() {
        let axis = AxisDef::new("x").with_keys(["a", "left"], ["d", "right"]);
        let fake = Fake {
            keys: ["d", "right"].into(),
            ..Fake::default()
        };
        assert_relative_eq!(evaluate(&axis, &fake), 1.0);
    }

    #[test]
    fn button_overrides_axis_and_keys_add_on_top() {
        let axis = AxisDef::new("x")
            .with_gamepad_axis(0, true)
            .with_gamepad_button(0)
            .with_keys(["a"], Vec::<String>::new());
        let mut fake = Fake {
            axis: 0.5,
            ..Fake::default()
        };
        assert_relative_eq!(evaluate(&axis, &fake), 0.0);

        fake.button = true;
        fake.keys.insert("a");
        assert_relative_eq!(evaluate(&axis, &fake), 0.0);

        fake.keys.clear();
        assert_relative_eq!(evaluate(&axis, &fake), 1.0);
    }

    #[test]
    fn inverted_gamepad_axis_is_negated() {
        let axis = AxisDef::new("y").with_gamepad_axis(1, true);
        let fake = Fake {
            axis: 0.25,
            ..Fake::default()
        };
        assert_relative_eq!(evaluate(&axis, &fake), -0.25);
    }

    #[test]
    fn definitions_deserialize_with_missing_fields() {
        let def: InputMappingDef = toml::from_str(
            r#"
            name = "movement"

            [[axes]]
            name = "horizontal"
            gamepad_axis = 0
            decrement = ["a", "ArrowLeft"]
            increment = ["d", "ArrowRight"]

            [[axes]]
            name = "jump"
            gamepad_button = 0
            "#,
        )
        .unwrap();

        assert_eq!(def.axes.len(), 2);
        assert_eq!(def.axes[0].gamepad_axis, Some(0));
        assert!(!def.axes[0].invert_axis);
        assert!(def.axes[1].increment.is_empty());
        assert_eq!(def.axes[1].gamepad_button, Some(0));
    }

    #[test]
    fn unknown_axis_reads_zero() {
        let mapping = InputMapping::new(InputMappingDef::default().axis(AxisDef::new("x")));
        assert_relative_eq!(mapping.value("nope"), 0.0);
    }
}
