use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{BandScale, LinearScale};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Numerical,
    Categorical,
}

/// Domain of one chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AxisDomain {
    /// `[0, upper_bound]`; the lower bound is always zero.
    Continuous { upper_bound: f64 },
    /// Ordered, unique labels.
    Categorical { categories: Vec<String> },
}

impl AxisDomain {
    #[must_use]
    pub fn kind(&self) -> AxisKind {
        match self {
            Self::Continuous { .. } => AxisKind::Numerical,
            Self::Categorical { .. } => AxisKind::Categorical,
        }
    }
}

/// One coordinate of a scatter point: a number on a continuous axis or a
/// label on a categorical one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Category(String),
}

impl AxisValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(label) => Some(label),
        }
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Category(label) => f.write_str(label),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AxisValue {
    fn from(label: &str) -> Self {
        Self::Category(label.to_owned())
    }
}

/// Pixel mapping for one axis, built from its domain.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Linear(LinearScale),
    Band(BandScale),
}

impl AxisScale {
    /// `inverted` puts the start of the domain at the far end of the extent,
    /// as vertical axes need.
    pub fn from_domain(
        domain: &AxisDomain,
        extent: f64,
        inverted: bool,
        band_padding: f64,
    ) -> ChartResult<Self> {
        match domain {
            AxisDomain::Continuous { upper_bound } => {
                if !upper_bound.is_finite() || *upper_bound <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "continuous axis upper bound must be finite and > 0".to_owned(),
                    ));
                }
                LinearScale::from_upper_bound(*upper_bound, extent, inverted).map(Self::Linear)
            }
            AxisDomain::Categorical { categories } => {
                BandScale::new(categories.clone(), extent, band_padding, inverted).map(Self::Band)
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        match self {
            Self::Linear(_) => AxisKind::Numerical,
            Self::Band(_) => AxisKind::Categorical,
        }
    }

    /// Domain value under `pixel`, unrounded.
    ///
    /// `None` when the pixel lies outside a continuous domain or in band padding.
    #[must_use]
    pub fn value_at(&self, pixel: f64) -> Option<AxisValue> {
        match self {
            Self::Linear(scale) => {
                let value = scale.to_domain(pixel);
                (value.is_finite() && scale.contains(value)).then_some(AxisValue::Number(value))
            }
            Self::Band(scale) => scale
                .category_for(pixel)
                .map(|label| AxisValue::Category(label.to_owned())),
        }
    }

    /// Pixel for a value; categories land on their band center.
    #[must_use]
    pub fn position_of(&self, value: &AxisValue) -> Option<f64> {
        match (self, value) {
            (Self::Linear(scale), AxisValue::Number(number)) => Some(scale.to_pixel(*number)),
            (Self::Band(scale), AxisValue::Category(label)) => {
                scale.index_of(label).and_then(|index| scale.center(index))
            }
            _ => None,
        }
    }
}
