use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::AxisValue;
use crate::error::{ChartError, ChartResult};

/// One bar: a category and its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    #[serde(rename = "label", alias = "category")]
    pub category: String,
    pub value: f64,
}

impl BarEntry {
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

/// Upper bound on the sum of all bar values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalSumConstraint {
    pub limit: f64,
}

impl TotalSumConstraint {
    #[must_use]
    pub const fn new(limit: f64) -> Self {
        Self { limit }
    }

    /// Budget left for one bar when the others already add up to `others_sum`.
    #[must_use]
    pub fn remaining(self, others_sum: f64) -> f64 {
        (self.limit - others_sum).max(0.0)
    }
}

/// Bar values keyed by category, in configuration order.
///
/// The category set is fixed at construction; every value starts at zero and
/// only changes through `set_value`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDataset {
    entries: IndexMap<String, f64>,
    upper_bound: f64,
    sum_limit: Option<TotalSumConstraint>,
}

impl BarDataset {
    #[must_use]
    pub fn new<I, S>(categories: I, upper_bound: f64, sum_limit: Option<TotalSumConstraint>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = categories
            .into_iter()
            .map(|category| (category.into(), 0.0))
            .collect();
        Self {
            entries,
            upper_bound,
            sum_limit,
        }
    }

    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    #[must_use]
    pub fn sum_limit(&self) -> Option<TotalSumConstraint> {
        self.sum_limit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(category, value)| (category.as_str(), *value))
    }

    #[must_use]
    pub fn value_of(&self, category: &str) -> Option<f64> {
        self.entries.get(category).copied()
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.entries.get_index_of(category)
    }

    #[must_use]
    pub fn current_sum(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Value `set_value` would store for `raw_value`, without storing it.
    ///
    /// Clamps to `[0, upper_bound]`, then to the remaining sum budget, then
    /// rounds to the nearest integer. Rounding never lands above either cap.
    pub fn constrain(&self, category: &str, raw_value: f64) -> ChartResult<f64> {
        if !raw_value.is_finite() {
            return Err(ChartError::InvalidData(
                "bar value must be finite".to_owned(),
            ));
        }
        if !self.entries.contains_key(category) {
            return Err(ChartError::InvalidData(format!(
                "unknown bar category `{category}`"
            )));
        }

        let mut cap = self.upper_bound;
        if let Some(limit) = self.sum_limit {
            let others_sum: f64 = self
                .entries
                .iter()
                .filter(|(key, _)| key.as_str() != category)
                .map(|(_, value)| *value)
                .sum();
            cap = cap.min(limit.remaining(others_sum));
        }

        let clamped = raw_value.clamp(0.0, cap.max(0.0));
        let rounded = clamped.round();
        Ok(if rounded > cap { cap.floor() } else { rounded })
    }

    /// Stores the constrained value for `category` and returns the new total.
    pub fn set_value(&mut self, category: &str, raw_value: f64) -> ChartResult<f64> {
        let value = self.constrain(category, raw_value)?;
        if let Some(slot) = self.entries.get_mut(category) {
            *slot = value;
        }
        let total = self.current_sum();
        trace!(category, raw_value, value, total, "set bar value");
        Ok(total)
    }

    /// Owned copy of the entries in category order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BarEntry> {
        self.iter()
            .map(|(category, value)| BarEntry::new(category, value))
            .collect()
    }
}

/// One scatter point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: AxisValue,
    pub y: AxisValue,
}

impl ScatterPoint {
    #[must_use]
    pub fn new(x: impl Into<AxisValue>, y: impl Into<AxisValue>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// Append-only list of scatter points in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterDataset {
    points: Vec<ScatterPoint>,
}

impl ScatterDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, point: ScatterPoint) {
        self.points.push(point);
        trace!(count = self.points.len(), "add scatter point");
    }

    #[must_use]
    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ScatterPoint> {
        self.points.clone()
    }
}

/// Dataset handed to the host; serializes as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartDataset {
    Bar(Vec<BarEntry>),
    Scatter(Vec<ScatterPoint>),
}

impl ChartDataset {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bar(entries) => entries.len(),
            Self::Scatter(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_bars(&self) -> Option<&[BarEntry]> {
        match self {
            Self::Bar(entries) => Some(entries),
            Self::Scatter(_) => None,
        }
    }

    #[must_use]
    pub fn as_points(&self) -> Option<&[ScatterPoint]> {
        match self {
            Self::Bar(_) => None,
            Self::Scatter(points) => Some(points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BarDataset, TotalSumConstraint};

    #[test]
    fn fractional_caps_are_not_exceeded_by_rounding() {
        let mut dataset = BarDataset::new(["a"], 10.5, None);
        assert_eq!(dataset.set_value("a", 10.5).expect("set"), 10.0);

        let mut dataset = BarDataset::new(["a", "b"], 100.0, Some(TotalSumConstraint::new(50.5)));
        dataset.set_value("a", 20.0).expect("set");
        assert_eq!(dataset.set_value("b", 40.0).expect("set"), 50.0);
    }

    #[test]
    fn unknown_category_is_an_error() {
        let mut dataset = BarDataset::new(["a"], 10.0, None);
        assert!(dataset.set_value("z", 1.0).is_err());
        assert!(dataset.set_value("a", f64::NAN).is_err());
    }
}
