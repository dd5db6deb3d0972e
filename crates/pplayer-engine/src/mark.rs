//! Mark data model.
//!
//! A mark is a labeled stop on the timeline. Marks are kept in an immutable
//! [`MarkSet`] snapshot; sequence order (not `percent`) defines traversal.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// External identity key of a mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkValue {
    /// Numeric key.
    Number(f64),
    /// String key.
    Text(String),
}

impl From<&str> for MarkValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MarkValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for MarkValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for MarkValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl std::fmt::Display for MarkValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A labeled stop on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Position on the track, 0 to 100.
    #[serde(default)]
    pub percent: f64,

    /// Label text rendered under the mark.
    pub label: String,

    /// Dwell time in seconds before playback advances to the next mark.
    #[serde(default)]
    pub time: f64,

    /// Whether the label is rendered.
    #[serde(default = "default_show_label")]
    pub show_label: bool,

    /// External identity key, matched against the selected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<MarkValue>,

    /// Opaque caller fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_show_label() -> bool {
    true
}

impl Mark {
    /// Create a mark with the given position, label and dwell time.
    pub fn new(percent: f64, label: impl Into<String>, time: f64) -> Self {
        Self {
            percent,
            label: label.into(),
            time,
            show_label: true,
            value: None,
            extra: Map::new(),
        }
    }

    /// Attach an external identity key.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<MarkValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Hide the label.
    #[must_use]
    pub fn hidden_label(mut self) -> Self {
        self.show_label = false;
        self
    }
}

/// Immutable snapshot of the mark sequence with layout applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkSet {
    marks: Vec<Mark>,
}

impl MarkSet {
    /// Build a snapshot from caller marks.
    ///
    /// With `distance_average`, mark `i` of `n` is placed at `i * 100/(n-1)`;
    /// a single mark sits at 0. The caller's marks are left untouched.
    pub fn new(marks: &[Mark], distance_average: bool) -> Self {
        let mut marks = marks.to_vec();
        if distance_average {
            let n = marks.len();
            for (i, mark) in marks.iter_mut().enumerate() {
                mark.percent = evenly_spaced_percent(i, n);
            }
        }
        Self { marks }
    }

    /// All marks in sequence order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Check if there are no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Get a mark by sequence index.
    pub fn get(&self, index: usize) -> Option<&Mark> {
        self.marks.get(index)
    }

    /// Index of the first mark at `percent`.
    pub fn index_of_percent(&self, percent: f64) -> Option<usize> {
        self.marks.iter().position(|m| m.percent == percent)
    }

    /// Index of the first mark whose value equals `value`.
    pub fn index_of_value(&self, value: &MarkValue) -> Option<usize> {
        self.marks
            .iter()
            .position(|m| m.value.as_ref() == Some(value))
    }

    /// Index of the first mark at or after `percent`.
    pub fn first_at_or_after(&self, percent: f64) -> Option<usize> {
        self.marks.iter().position(|m| m.percent >= percent)
    }

    /// Iterate over the positions of all marks.
    pub fn percents(&self) -> impl Iterator<Item = f64> + '_ {
        self.marks.iter().map(|m| m.percent)
    }
}

/// Percent of mark `index` when `count` marks are spread evenly.
pub fn evenly_spaced_percent(index: usize, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    index as f64 * (100.0 / (count - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Mark> {
        vec![
            Mark::new(0.0, "Alarm", 2.0),
            Mark::new(10.0, "Handle", 2.0),
            Mark::new(60.0, "Rescue", 4.0),
            Mark::new(100.0, "End", 3.0),
        ]
    }

    #[test]
    fn test_distance_average_spacing() {
        for n in 2..12 {
            let marks: Vec<Mark> = (0..n).map(|i| Mark::new(3.0, format!("m{i}"), 1.0)).collect();
            let set = MarkSet::new(&marks, true);
            for (i, mark) in set.marks().iter().enumerate() {
                assert_eq!(mark.percent, i as f64 * (100.0 / (n - 1) as f64));
            }
            assert_eq!(set.marks()[n - 1].percent, 100.0);
        }
    }

    #[test]
    fn test_distance_average_single_mark() {
        let set = MarkSet::new(&[Mark::new(42.0, "only", 1.0)], true);
        assert_eq!(set.marks()[0].percent, 0.0);
    }

    #[test]
    fn test_distance_average_leaves_caller_marks() {
        let marks = sample();
        let set = MarkSet::new(&marks, true);
        assert_eq!(marks[1].percent, 10.0);
        assert!((set.marks()[1].percent - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(set.marks()[1].label, "Handle");
    }

    #[test]
    fn test_declared_percents_kept() {
        let set = MarkSet::new(&sample(), false);
        let percents: Vec<f64> = set.percents().collect();
        assert_eq!(percents, vec![0.0, 10.0, 60.0, 100.0]);
    }

    #[test]
    fn test_lookups() {
        let marks = vec![
            Mark::new(0.0, "a", 1.0).with_value("start"),
            Mark::new(10.0, "b", 1.0).with_value(7),
            Mark::new(10.0, "c", 1.0).hidden_label(),
        ];
        let set = MarkSet::new(&marks, false);

        assert_eq!(set.index_of_percent(10.0), Some(1));
        assert_eq!(set.index_of_percent(55.0), None);
        assert_eq!(set.index_of_value(&"start".into()), Some(0));
        assert_eq!(set.index_of_value(&MarkValue::Number(7.0)), Some(1));
        assert_eq!(set.index_of_value(&"missing".into()), None);
        assert_eq!(set.first_at_or_after(5.0), Some(1));
        assert_eq!(set.first_at_or_after(101.0), None);
    }

    #[test]
    fn test_mark_deserialize_defaults_and_extra() {
        let json = r#"{"percent": 50, "label": "Mid", "time": 3, "color": "red", "value": "mid"}"#;
        let mark: Mark = serde_json::from_str(json).unwrap();
        assert_eq!(mark.percent, 50.0);
        assert!(mark.show_label);
        assert_eq!(mark.value, Some(MarkValue::Text("mid".into())));
        assert_eq!(mark.extra.get("color"), Some(&Value::String("red".into())));

        let back = serde_json::to_string(&mark).unwrap();
        assert!(back.contains("\"color\":\"red\""));
    }

    #[test]
    fn test_numeric_value_deserialize() {
        let mark: Mark = serde_json::from_str(r#"{"label": "x", "value": 3}"#).unwrap();
        assert_eq!(mark.value, Some(MarkValue::Number(3.0)));
        assert_eq!(mark.time, 0.0);
    }
}
