use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{BarDataset, BarEntry, BarMapper, Orientation, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::interaction::{
    BarInteraction, CursorStyle, HighlightChange, InteractionState, PointerEvent,
};
use crate::render::{CanvasLayerKind, LayerStack, LayeredRenderFrame, Renderer};

use super::scene_builder::{
    AxisTitles, build_bar_axes, build_bar_grid, build_bar_highlight, build_bar_marks,
};
use super::{BarChartConfig, ChartStyle};

/// Callback receiving the new bar total after every accepted edit.
pub type SumListener = Rc<dyn Fn(f64)>;

/// Interactive bar chart: pointer drags set bar values.
///
/// One engine serves both orientations; the orientation only changes which
/// pointer coordinate drives the value axis.
pub struct BarChartEngine<R: Renderer> {
    renderer: R,
    config: BarChartConfig,
    style: ChartStyle,
    viewport: Viewport,
    mapper: BarMapper,
    dataset: BarDataset,
    interaction: BarInteraction,
    scene: LayeredRenderFrame,
    on_sum_update: Option<SumListener>,
    destroyed: bool,
}

impl<R: Renderer> BarChartEngine<R> {
    /// Validates the setup, builds the static layers and draws the first frame.
    pub fn new(
        orientation: Orientation,
        config: BarChartConfig,
        viewport: Viewport,
        style: ChartStyle,
        renderer: R,
        on_sum_update: Option<SumListener>,
    ) -> ChartResult<Self> {
        config.validate()?;
        style.validate()?;
        let plot = PlotArea::from_viewport(viewport, style.margins)?;
        let mapper = BarMapper::new(
            plot,
            orientation,
            config.labels.clone(),
            config.max_value,
            style.bar_band_padding,
        )?;
        let dataset = BarDataset::new(
            config.labels.iter(),
            config.max_value,
            config.sum_constraint(),
        );

        let mut engine = Self {
            renderer,
            config,
            style,
            viewport,
            mapper,
            dataset,
            interaction: BarInteraction::new(orientation),
            scene: LayeredRenderFrame::from_stack(viewport, LayerStack::canonical()),
            on_sum_update,
            destroyed: false,
        };
        engine.build_static_layers();
        engine.rebuild_marks();
        engine.render()?;
        debug!(
            ?orientation,
            categories = engine.dataset.len(),
            max_value = engine.config.max_value,
            sum_limit = ?engine.config.total_sum_limit,
            width = viewport.width,
            height = viewport.height,
            "bar chart built"
        );
        Ok(engine)
    }

    /// Feeds one pointer event through the state machine.
    ///
    /// Returns `true` when the event changed a bar value. Events after
    /// `destroy` are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChartResult<bool> {
        if self.destroyed {
            trace!(?event, "pointer event after destroy ignored");
            return Ok(false);
        }

        let hit = event.position().and_then(|point| self.mapper.resolve(point));
        let reaction = self.interaction.on_event(event, hit);

        let mut changed = false;
        if let Some(edit) = reaction.edit {
            let total = self.dataset.set_value(&edit.category, edit.raw_value)?;
            self.rebuild_marks();
            if let Some(listener) = &self.on_sum_update {
                listener(total);
            }
            changed = true;
        }

        let highlight_changed = match reaction.highlight {
            HighlightChange::Unchanged => false,
            HighlightChange::Clear => {
                self.scene.rebuild_layer(CanvasLayerKind::Highlight, |_| {});
                true
            }
            HighlightChange::Show(hit) => {
                let preview = self.dataset.constrain(&hit.category, hit.raw_value)?;
                let mapper = &self.mapper;
                let style = &self.style;
                self.scene.rebuild_layer(CanvasLayerKind::Highlight, |layer| {
                    build_bar_highlight(layer, mapper, hit.index, preview, style);
                });
                true
            }
        };

        if !changed && !highlight_changed {
            trace!(?event, state = ?self.interaction.state(), "pointer event without effect");
            return Ok(false);
        }
        self.render()?;
        Ok(changed)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        self.handle_pointer(PointerEvent::Down { x, y })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        self.handle_pointer(PointerEvent::Move { x, y })
    }

    pub fn pointer_up(&mut self) -> ChartResult<bool> {
        self.handle_pointer(PointerEvent::Up)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<bool> {
        self.handle_pointer(PointerEvent::Leave)
    }

    /// Draws the current scene. A destroyed chart draws nothing.
    pub fn render(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let frame = self.scene.flatten();
        self.renderer.render(&frame)
    }

    /// Tears the chart down: empties the scene, clears the surface once and
    /// drops the sum listener. Calling it again does nothing.
    pub fn destroy(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;
        self.on_sum_update = None;
        self.scene.clear_all();
        debug!(orientation = ?self.mapper.orientation(), "bar chart destroyed");
        self.renderer.clear()
    }

    /// Owned copy of the bar values in category order.
    #[must_use]
    pub fn data(&self) -> Vec<BarEntry> {
        self.dataset.snapshot()
    }

    #[must_use]
    pub fn current_sum(&self) -> f64 {
        self.dataset.current_sum()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.interaction.cursor()
    }

    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        self.interaction.state()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.mapper.orientation()
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn mapper(&self) -> &BarMapper {
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
            x: &self.config.x_axis_label,
            y: &self.config.y_axis_label,
        };
        self.scene.set_background(Some(style.background));
        self.scene.rebuild_layer(CanvasLayerKind::Grid, |layer| {
            build_bar_grid(layer, mapper, style);
        });
        self.scene.rebuild_layer(CanvasLayerKind::Axis, |layer| {
            build_bar_axes(layer, mapper, &titles, style);
        });
    }

    fn rebuild_marks(&mut self) {
        let mapper = &self.mapper;
        let style = &self.style;
        let dataset = &self.dataset;
        self.scene.rebuild_layer(CanvasLayerKind::Marks, |layer| {
            build_bar_marks(layer, mapper, dataset.iter(), style);
        });
    }
}
