//! chart-vibe: interactive chart authoring.
//!
//! Users draw a dataset instead of typing it: dragging sets bar values on
//! vertical or horizontal bar charts, clicking adds points to a scatter chart.
//! The crate covers pixel/domain mapping, the constrained datasets, the
//! pointer state machine, a retained layered scene behind the `Renderer`
//! trait, and export/analysis collaborators for the finished dataset.

pub mod analysis;
pub mod api;
pub mod core;
pub mod error;
pub mod export;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartHost, ChartKind, ChartSpec, ChartStyle};
pub use error::{ChartError, ChartResult};
pub use export::{ExportDocument, ExportFormat};
