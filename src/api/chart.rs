use serde::{Deserialize, Serialize};

use crate::core::{ChartDataset, Orientation, Viewport};
use crate::error::ChartResult;
use crate::export::ExportDocument;
use crate::interaction::{CursorStyle, PointerEvent};
use crate::render::{LayeredRenderFrame, Renderer};

use super::{
    BarChartConfig, BarChartEngine, ChartConfig, ChartKind, ChartStyle, ScatterChartEngine,
    SumListener,
};

/// Everything needed to build one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub config: ChartConfig,
    pub viewport: Viewport,
    #[serde(default)]
    pub style: ChartStyle,
}

impl ChartSpec {
    #[must_use]
    pub fn new(config: ChartConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }
}

/// A built chart of either family behind one lifecycle surface.
pub enum Chart<R: Renderer> {
    Bar(BarChartEngine<R>),
    Scatter(ScatterChartEngine<R>),
}

impl<R: Renderer> Chart<R> {
    /// Builds the chart `spec` describes on `renderer`.
    ///
    /// `on_sum_update` is only used by bar charts.
    pub fn build(
        spec: &ChartSpec,
        renderer: R,
        on_sum_update: Option<SumListener>,
    ) -> ChartResult<Self> {
        spec.config.validate()?;
        match &spec.config {
            ChartConfig::Vertical(config) => {
                Self::build_bar(Orientation::Vertical, config, spec, renderer, on_sum_update)
            }
            ChartConfig::Horizontal(config) => {
                Self::build_bar(Orientation::Horizontal, config, spec, renderer, on_sum_update)
            }
            ChartConfig::Scatter(config) => {
                ScatterChartEngine::new(config.clone(), spec.viewport, spec.style, renderer)
                    .map(Self::Scatter)
            }
        }
    }

    fn build_bar(
        orientation: Orientation,
        config: &BarChartConfig,
        spec: &ChartSpec,
        renderer: R,
        on_sum_update: Option<SumListener>,
    ) -> ChartResult<Self> {
        BarChartEngine::new(
            orientation,
            config.clone(),
            spec.viewport,
            spec.style,
            renderer,
            on_sum_update,
        )
        .map(Self::Bar)
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Bar(engine) => match engine.orientation() {
                Orientation::Vertical => ChartKind::Vertical,
                Orientation::Horizontal => ChartKind::Horizontal,
            },
            Self::Scatter(_) => ChartKind::Scatter,
        }
    }

    /// The drawing surface the chart renders into.
    #[must_use]
    pub fn surface(&self) -> &R {
        match self {
            Self::Bar(engine) => engine.surface(),
            Self::Scatter(engine) => engine.surface(),
        }
    }

    #[must_use]
    pub fn into_surface(self) -> R {
        match self {
            Self::Bar(engine) => engine.into_surface(),
            Self::Scatter(engine) => engine.into_surface(),
        }
    }

    /// Owned snapshot of the current dataset.
    #[must_use]
    pub fn data(&self) -> ChartDataset {
        match self {
            Self::Bar(engine) => ChartDataset::Bar(engine.data()),
            Self::Scatter(engine) => ChartDataset::Scatter(engine.data()),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChartResult<bool> {
        match self {
            Self::Bar(engine) => engine.handle_pointer(event),
            Self::Scatter(engine) => engine.handle_pointer(event),
        }
    }

    pub fn destroy(&mut self) -> ChartResult<()> {
        match self {
            Self::Bar(engine) => engine.destroy(),
            Self::Scatter(engine) => engine.destroy(),
        }
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        match self {
            Self::Bar(engine) => engine.is_destroyed(),
            Self::Scatter(engine) => engine.is_destroyed(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        match self {
            Self::Bar(engine) => engine.cursor(),
            Self::Scatter(engine) => engine.cursor(),
        }
    }

    #[must_use]
    pub fn scene(&self) -> &LayeredRenderFrame {
        match self {
            Self::Bar(engine) => engine.scene(),
            Self::Scatter(engine) => engine.scene(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        match self {
            Self::Bar(engine) => engine.viewport(),
            Self::Scatter(engine) => engine.viewport(),
        }
    }

    /// Dataset plus axis titles, ready for JSON or CSV export.
    #[must_use]
    pub fn export_document(&self) -> ExportDocument {
        let (x_axis_label, y_axis_label) = match self {
            Self::Bar(engine) => (
                engine.config().x_axis_label.as_str(),
                engine.config().y_axis_label.as_str(),
            ),
            Self::Scatter(engine) => (
                engine.config().x_axis.label(),
                engine.config().y_axis.label(),
            ),
        };
        ExportDocument::new(self.data(), x_axis_label, y_axis_label)
    }
}
