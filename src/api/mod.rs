//! Chart construction and lifecycle: configuration, the two chart engines,
//! the `Chart` facade and the container-level `ChartHost`.

mod bar_engine;
mod chart;
mod chart_config;
mod chart_style;
mod host;
mod label_format;
mod scatter_engine;
mod scene_builder;
mod validation;

pub use bar_engine::{BarChartEngine, SumListener};
pub use chart::{Chart, ChartSpec};
pub use chart_config::{AxisConfig, BarChartConfig, ChartConfig, ChartKind, ScatterChartConfig};
pub use chart_style::ChartStyle;
pub use host::{ChartHost, SurfaceFactory};
pub use label_format::format_value_label;
pub use scatter_engine::ScatterChartEngine;
pub use validation::parse_labels;
