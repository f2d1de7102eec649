use tracing::{debug, trace};

use crate::core::{PlotArea, ScatterDataset, ScatterMapper, ScatterPoint, Viewport};
use crate::error::ChartResult;
use crate::interaction::{CursorStyle, PointerEvent, scatter_click_position};
use crate::render::{CanvasLayerKind, LayerStack, LayeredRenderFrame, Renderer};

use super::scene_builder::{AxisTitles, build_scatter_axes, build_scatter_marks};
use super::{ChartStyle, ScatterChartConfig};

/// Interactive scatter chart: each click inside both axis domains adds a point.
pub struct ScatterChartEngine<R: Renderer> {
    renderer: R,
    config: ScatterChartConfig,
    style: ChartStyle,
    viewport: Viewport,
    mapper: ScatterMapper,
    dataset: ScatterDataset,
    scene: LayeredRenderFrame,
    destroyed: bool,
}

impl<R: Renderer> ScatterChartEngine<R> {
    pub fn new(
        config: ScatterChartConfig,
        viewport: Viewport,
        style: ChartStyle,
        renderer: R,
    ) -> ChartResult<Self> {
        config.validate()?;
        style.validate()?;
        let plot = PlotArea::from_viewport(viewport, style.margins)?;
        let mapper = ScatterMapper::new(
            plot,
            &config.x_axis.domain(),
            &config.y_axis.domain(),
            style.scatter_band_padding,
        )?;

        let mut engine = Self {
            renderer,
            config,
            style,
            viewport,
            mapper,
            dataset: ScatterDataset::new(),
            scene: LayeredRenderFrame::from_stack(viewport, LayerStack::canonical()),
            destroyed: false,
        };
        engine.build_static_layers();
        engine.render()?;
        debug!(
            x_axis = ?engine.mapper.x_scale().kind(),
            y_axis = ?engine.mapper.y_scale().kind(),
            width = viewport.width,
            height = viewport.height,
            "scatter chart built"
        );
        Ok(engine)
    }

    /// Adds a point for a click that maps into both domains.
    ///
    /// Returns `true` when a point was added. Every other event, and any
    /// event after `destroy`, is ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChartResult<bool> {
        if self.destroyed {
            trace!(?event, "pointer event after destroy ignored");
            return Ok(false);
        }
        let Some(position) = scatter_click_position(event) else {
            return Ok(false);
        };
        let Some(point) = self.mapper.resolve(position) else {
            trace!(x = position.x, y = position.y, "click outside scatter domain ignored");
            return Ok(false);
        };

        self.dataset.add_point(point);
        self.rebuild_marks();
        self.render()?;
        Ok(true)
    }

    pub fn click(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        self.handle_pointer(PointerEvent::Click { x, y })
    }

    pub fn render(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let frame = self.scene.flatten();
        self.renderer.render(&frame)
    }

    /// Empties the scene and clears the surface once; later calls do nothing.
    pub fn destroy(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;
        self.scene.clear_all();
        debug!(points = self.dataset.len(), "scatter chart destroyed");
        self.renderer.clear()
    }

    /// Owned copy of the points in click order.
    #[must_use]
    pub fn data(&self) -> Vec<ScatterPoint> {
        self.dataset.snapshot()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        CursorStyle::Crosshair
    }

    #[must_use]
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn mapper(&self) -> &ScatterMapper {
        &self.mapper
    }

    #[must_use]
    pub fn scene(&self) -> &LayeredRenderFrame {
        &self.scene
    }

    #[must_use]
    pub fn surface(&self) -> &R {
        &self.renderer
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_surface(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn build_static_layers(&mut self) {
        let mapper = &self.mapper;
        let style = &self.style;
        let titles = AxisTitles {
            x: self.config.x_axis.label(),
            y: self.config.y_axis.label(),
        };
        self.scene.set_background(Some(style.background));
        self.scene.rebuild_layer(CanvasLayerKind::Axis, |layer| {
            build_scatter_axes(layer, mapper, &titles, style);
        });
    }

    fn rebuild_marks(&mut self) {
        let mapper = &self.mapper;
        let style = &self.style;
        let points = self.dataset.points();
        self.scene.rebuild_layer(CanvasLayerKind::Marks, |layer| {
            build_scatter_marks(layer, mapper, points, style);
        });
    }
}
