use std::rc::Rc;

use tracing::debug;

use crate::core::{ChartDataset, Viewport};
use crate::error::ChartResult;
use crate::export::ExportDocument;
use crate::interaction::{CursorStyle, PointerEvent};
use crate::render::Renderer;

use super::{Chart, ChartConfig, ChartSpec, ChartStyle, SumListener};

/// Creates a fresh drawing surface for a viewport.
pub type SurfaceFactory<R> = Box<dyn FnMut(Viewport) -> ChartResult<R>>;

/// Owns the chart for one container: its configuration, a surface factory
/// and the sum listener.
///
/// A chart is built on the first `resize`. Every later resize or
/// reconfiguration destroys the current chart before the next one is built,
/// so in-progress edits are discarded.
pub struct ChartHost<R: Renderer> {
    config: ChartConfig,
    style: ChartStyle,
    make_surface: SurfaceFactory<R>,
    on_sum_update: Option<SumListener>,
    chart: Option<Chart<R>>,
    viewport: Option<Viewport>,
}

impl<R: Renderer> ChartHost<R> {
    pub fn new(
        config: ChartConfig,
        style: ChartStyle,
        make_surface: impl FnMut(Viewport) -> ChartResult<R> + 'static,
    ) -> ChartResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self {
            config,
            style,
            make_surface: Box::new(make_surface),
            on_sum_update: None,
            chart: None,
            viewport: None,
        })
    }

    /// Listener handed to every bar chart this host builds.
    #[must_use]
    pub fn with_sum_listener(mut self, listener: impl Fn(f64) + 'static) -> Self {
        self.on_sum_update = Some(Rc::new(listener));
        self
    }

    /// Tears down the current chart, then builds one for `viewport`.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.teardown()?;
        let renderer = (self.make_surface)(viewport)?;
        let spec = ChartSpec {
            config: self.config.clone(),
            viewport,
            style: self.style,
        };
        let chart = Chart::build(&spec, renderer, self.on_sum_update.clone())?;
        debug!(
            kind = %chart.kind(),
            width = viewport.width,
            height = viewport.height,
            "chart host rebuilt"
        );
        self.chart = Some(chart);
        self.viewport = Some(viewport);
        Ok(())
    }

    /// Sizes the chart from a container width: at least 300 px wide, 4:3.
    pub fn resize_to_container(&mut self, client_width: u32) -> ChartResult<()> {
        self.resize(Viewport::for_container_width(client_width))
    }

    /// Swaps the configuration; a live chart is rebuilt at its current size.
    pub fn reconfigure(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        match self.viewport {
            Some(viewport) => self.resize(viewport),
            None => Ok(()),
        }
    }

    /// Forwards a pointer event; `Ok(false)` when no chart is built.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChartResult<bool> {
        match self.chart.as_mut() {
            Some(chart) => chart.handle_pointer(event),
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<ChartDataset> {
        self.chart.as_ref().map(Chart::data)
    }

    #[must_use]
    pub fn export_document(&self) -> Option<ExportDocument> {
        self.chart.as_ref().map(Chart::export_document)
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.chart
            .as_ref()
            .map_or(CursorStyle::Crosshair, Chart::cursor)
    }

    #[must_use]
    pub fn chart(&self) -> Option<&Chart<R>> {
        self.chart.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Destroys and drops the current chart, if any.
    pub fn destroy(&mut self) -> ChartResult<()> {
        self.viewport = None;
        self.teardown()
    }

    fn teardown(&mut self) -> ChartResult<()> {
        match self.chart.take() {
            Some(mut chart) => chart.destroy(),
            None => Ok(()),
        }
    }
}
