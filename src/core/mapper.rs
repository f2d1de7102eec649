use serde::{Deserialize, Serialize};

use crate::core::primitives::round_to_precision;
use crate::core::{
    AxisDomain, AxisScale, AxisValue, BandScale, LinearScale, PixelRect, PlotArea, ScatterPoint,
    ScreenPoint,
};
use crate::error::ChartResult;
use crate::render::TextHAlign;

/// Fractional digits kept for scatter coordinates.
pub const SCATTER_PRECISION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Bars grow upward from the bottom edge.
    Vertical,
    /// Bars grow rightward from the left edge.
    Horizontal,
}

/// Which pixel coordinate drives each bar-chart axis.
///
/// Both bar orientations share one engine; only this pair of pure functions
/// differs between them.
#[derive(Debug, Clone, Copy)]
pub struct BarOrientation {
    orientation: Orientation,
    value_axis_of: fn(ScreenPoint) -> f64,
    category_axis_of: fn(ScreenPoint) -> f64,
}

impl BarOrientation {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Self {
                orientation,
                value_axis_of: |point| point.y,
                category_axis_of: |point| point.x,
            },
            Orientation::Horizontal => Self {
                orientation,
                value_axis_of: |point| point.x,
                category_axis_of: |point| point.y,
            },
        }
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn value_axis_of(self, point: ScreenPoint) -> f64 {
        (self.value_axis_of)(point)
    }

    #[must_use]
    pub fn category_axis_of(self, point: ScreenPoint) -> f64 {
        (self.category_axis_of)(point)
    }

    #[must_use]
    pub fn value_extent(self, plot: PlotArea) -> f64 {
        match self.orientation {
            Orientation::Vertical => plot.height,
            Orientation::Horizontal => plot.width,
        }
    }

    #[must_use]
    pub fn category_extent(self, plot: PlotArea) -> f64 {
        match self.orientation {
            Orientation::Vertical => plot.width,
            Orientation::Horizontal => plot.height,
        }
    }

    /// Vertical bars grow against the pixel-Y direction.
    #[must_use]
    pub fn value_axis_inverted(self) -> bool {
        self.orientation == Orientation::Vertical
    }
}

/// Category and unconstrained value under a pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct BarHit {
    pub index: usize,
    pub category: String,
    pub raw_value: f64,
}

/// Anchor for a bar's numeric label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub h_align: TextHAlign,
}

const VALUE_LABEL_GAP_PX: f64 = 5.0;

/// Pixel/domain mapping for bar charts.
#[derive(Debug, Clone)]
pub struct BarMapper {
    plot: PlotArea,
    orientation: BarOrientation,
    value_scale: LinearScale,
    category_scale: BandScale,
}

impl BarMapper {
    pub fn new(
        plot: PlotArea,
        orientation: Orientation,
        categories: Vec<String>,
        upper_bound: f64,
        band_padding: f64,
    ) -> ChartResult<Self> {
        let orientation = BarOrientation::new(orientation);
        let value_scale = LinearScale::from_upper_bound(
            upper_bound,
            orientation.value_extent(plot),
            orientation.value_axis_inverted(),
        )?;
        let category_scale = BandScale::new(
            categories,
            orientation.category_extent(plot),
            band_padding,
            false,
        )?;
        Ok(Self {
            plot,
            orientation,
            value_scale,
            category_scale,
        })
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation.orientation()
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.value_scale
    }

    #[must_use]
    pub fn category_scale(&self) -> &BandScale {
        &self.category_scale
    }

    /// Resolves a surface position to the band under it and the raw value.
    ///
    /// `None` when the position falls in band padding or beside the bands.
    #[must_use]
    pub fn resolve(&self, surface_point: ScreenPoint) -> Option<BarHit> {
        let local = self.plot.to_local(surface_point);
        let index = self
            .category_scale
            .band_for(self.orientation.category_axis_of(local))?;
        let raw_value = self
            .value_scale
            .to_domain(self.orientation.value_axis_of(local));
        Some(BarHit {
            index,
            category: self.category_scale.categories()[index].clone(),
            raw_value,
        })
    }

    /// Surface rectangle of bar `index` drawn at `value`.
    #[must_use]
    pub fn bar_rect(&self, index: usize, value: f64) -> Option<PixelRect> {
        let band_start = self.category_scale.band_start(index)?;
        let bandwidth = self.category_scale.bandwidth();
        let base = self.value_scale.to_pixel(0.0);
        let tip = self.value_scale.to_pixel(value);
        let local = match self.orientation.orientation() {
            Orientation::Vertical => {
                PixelRect::new(band_start, tip.min(base), bandwidth, (base - tip).abs())
            }
            Orientation::Horizontal => {
                PixelRect::new(base.min(tip), band_start, (tip - base).abs(), bandwidth)
            }
        };
        let origin = self.plot.to_surface(ScreenPoint::new(local.x, local.y));
        Some(PixelRect::new(origin.x, origin.y, local.width, local.height))
    }

    /// Where the numeric label for bar `index` goes: above a vertical bar,
    /// right of a horizontal one.
    #[must_use]
    pub fn value_label_anchor(&self, index: usize, value: f64) -> Option<LabelAnchor> {
        let center = self.category_scale.center(index)?;
        let tip = self.value_scale.to_pixel(value);
        let (local, h_align) = match self.orientation.orientation() {
            Orientation::Vertical => (
                ScreenPoint::new(center, tip - VALUE_LABEL_GAP_PX),
                TextHAlign::Center,
            ),
            Orientation::Horizontal => (
                ScreenPoint::new(tip + VALUE_LABEL_GAP_PX, center),
                TextHAlign::Left,
            ),
        };
        let surface = self.plot.to_surface(local);
        Some(LabelAnchor {
            x: surface.x,
            y: surface.y,
            h_align,
        })
    }
}

/// Pixel/domain mapping for scatter charts; each axis is numeric or categorical.
#[derive(Debug, Clone)]
pub struct ScatterMapper {
    plot: PlotArea,
    x_scale: AxisScale,
    y_scale: AxisScale,
}

impl ScatterMapper {
    pub fn new(
        plot: PlotArea,
        x_domain: &AxisDomain,
        y_domain: &AxisDomain,
        band_padding: f64,
    ) -> ChartResult<Self> {
        let x_scale = AxisScale::from_domain(x_domain, plot.width, false, band_padding)?;
        let y_scale = AxisScale::from_domain(y_domain, plot.height, true, band_padding)?;
        Ok(Self {
            plot,
            x_scale,
            y_scale,
        })
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn x_scale(&self) -> &AxisScale {
        &self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> &AxisScale {
        &self.y_scale
    }

    /// Maps a surface position to a point, both axes at once.
    ///
    /// `None` when either coordinate is outside its domain or in band padding.
    /// Numeric coordinates are checked unrounded and stored with two decimals.
    #[must_use]
    pub fn resolve(&self, surface_point: ScreenPoint) -> Option<ScatterPoint> {
        let local = self.plot.to_local(surface_point);
        let x = round_axis_value(self.x_scale.value_at(local.x)?)?;
        let y = round_axis_value(self.y_scale.value_at(local.y)?)?;
        Some(ScatterPoint { x, y })
    }

    /// Surface position of an existing point.
    #[must_use]
    pub fn position_of(&self, point: &ScatterPoint) -> Option<ScreenPoint> {
        let x = self.x_scale.position_of(&point.x)?;
        let y = self.y_scale.position_of(&point.y)?;
        Some(self.plot.to_surface(ScreenPoint::new(x, y)))
    }
}

fn round_axis_value(value: AxisValue) -> Option<AxisValue> {
    match value {
        AxisValue::Number(number) => round_to_precision(number, SCATTER_PRECISION)
            .ok()
            .map(AxisValue::Number),
        category @ AxisValue::Category(_) => Some(category),
    }
}
