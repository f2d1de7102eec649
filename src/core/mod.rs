pub mod axis;
pub mod band_scale;
pub mod dataset;
pub mod mapper;
pub mod primitives;
pub mod scale;
pub mod types;

pub use axis::{AxisDomain, AxisKind, AxisScale, AxisValue};
pub use band_scale::BandScale;
pub use dataset::{
    BarDataset, BarEntry, ChartDataset, ScatterDataset, ScatterPoint, TotalSumConstraint,
};
pub use mapper::{BarHit, BarMapper, BarOrientation, LabelAnchor, Orientation, ScatterMapper};
pub use scale::{LinearScale, Ticks};
pub use types::{Margins, PixelRect, PlotArea, ScreenPoint, Viewport};
