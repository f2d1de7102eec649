use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{AxisDomain, Orientation, TotalSumConstraint};
use crate::error::ChartResult;

use super::validation::{validate_bar_config, validate_scatter_config};

const DEFAULT_LABELS: [&str; 4] = ["Sales", "Marketing", "R&D", "Support"];
const DEFAULT_MAX_VALUE: f64 = 1000.0;

/// Chart variants a host can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Vertical,
    Horizontal,
    Scatter,
}

impl ChartKind {
    #[must_use]
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Self::Vertical => Some(Orientation::Vertical),
            Self::Horizontal => Some(Orientation::Horizontal),
            Self::Scatter => None,
        }
    }

    #[must_use]
    pub fn is_bar(self) -> bool {
        self.orientation().is_some()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Scatter => "scatter",
        })
    }
}

/// Bar chart setup: one bar per label, values in `[0, max_value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartConfig {
    pub labels: Vec<String>,
    pub max_value: f64,
    #[serde(default)]
    pub total_sum_limit: Option<f64>,
    #[serde(default)]
    pub x_axis_label: String,
    #[serde(default)]
    pub y_axis_label: String,
}

impl BarChartConfig {
    #[must_use]
    pub fn new(labels: Vec<String>, max_value: f64) -> Self {
        Self {
            labels,
            max_value,
            total_sum_limit: None,
            x_axis_label: String::new(),
            y_axis_label: String::new(),
        }
    }

    /// Starting values of the configuration form; axis titles follow the orientation.
    #[must_use]
    pub fn default_for(orientation: Orientation) -> Self {
        let (x_axis_label, y_axis_label) = match orientation {
            Orientation::Vertical => ("Categories", "Value"),
            Orientation::Horizontal => ("Value", "Categories"),
        };
        Self {
            labels: DEFAULT_LABELS.iter().map(|label| (*label).to_owned()).collect(),
            max_value: DEFAULT_MAX_VALUE,
            total_sum_limit: None,
            x_axis_label: x_axis_label.to_owned(),
            y_axis_label: y_axis_label.to_owned(),
        }
    }

    #[must_use]
    pub fn with_total_sum_limit(mut self, limit: f64) -> Self {
        self.total_sum_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x_axis_label: &str, y_axis_label: &str) -> Self {
        self.x_axis_label = x_axis_label.trim().to_owned();
        self.y_axis_label = y_axis_label.trim().to_owned();
        self
    }

    #[must_use]
    pub fn value_domain(&self) -> AxisDomain {
        AxisDomain::Continuous {
            upper_bound: self.max_value,
        }
    }

    #[must_use]
    pub fn category_domain(&self) -> AxisDomain {
        AxisDomain::Categorical {
            categories: self.labels.clone(),
        }
    }

    #[must_use]
    pub fn sum_constraint(&self) -> Option<TotalSumConstraint> {
        self.total_sum_limit.map(TotalSumConstraint::new)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_bar_config(self)
    }
}

/// One scatter axis: numeric `[0, max_value]` or a list of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AxisConfig {
    Numerical {
        label: String,
        #[serde(rename = "maxValue")]
        max_value: f64,
    },
    Categorical {
        label: String,
        values: Vec<String>,
    },
}

impl AxisConfig {
    #[must_use]
    pub fn numerical(label: &str, max_value: f64) -> Self {
        Self::Numerical {
            label: label.to_owned(),
            max_value,
        }
    }

    #[must_use]
    pub fn categorical<I, S>(label: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Categorical {
            label: label.to_owned(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Numerical { label, .. } | Self::Categorical { label, .. } => label,
        }
    }

    #[must_use]
    pub fn domain(&self) -> AxisDomain {
        match self {
            Self::Numerical { max_value, .. } => AxisDomain::Continuous {
                upper_bound: *max_value,
            },
            Self::Categorical { values, .. } => AxisDomain::Categorical {
                categories: values.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChartConfig {
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
}

impl ScatterChartConfig {
    #[must_use]
    pub fn new(x_axis: AxisConfig, y_axis: AxisConfig) -> Self {
        Self { x_axis, y_axis }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_scatter_config(self)
    }
}

/// Full chart configuration, tagged by chart kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartConfig {
    Vertical(BarChartConfig),
    Horizontal(BarChartConfig),
    Scatter(ScatterChartConfig),
}

impl ChartConfig {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Vertical(_) => ChartKind::Vertical,
            Self::Horizontal(_) => ChartKind::Horizontal,
            Self::Scatter(_) => ChartKind::Scatter,
        }
    }

    #[must_use]
    pub fn x_axis_label(&self) -> &str {
        match self {
            Self::Vertical(config) | Self::Horizontal(config) => &config.x_axis_label,
            Self::Scatter(config) => config.x_axis.label(),
        }
    }

    #[must_use]
    pub fn y_axis_label(&self) -> &str {
        match self {
            Self::Vertical(config) | Self::Horizontal(config) => &config.y_axis_label,
            Self::Scatter(config) => config.y_axis.label(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Vertical(config) | Self::Horizontal(config) => config.validate(),
            Self::Scatter(config) => config.validate(),
        }
    }
}
