use crate::core::Viewport;

use super::{
    CanvasLayerKind, CirclePrimitive, Color, DrawCommand, LayerStack, LinePrimitive,
    RectPrimitive, RenderFrame, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    /// Bumped every time the layer is rebuilt.
    pub revision: u64,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            revision: 0,
            lines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.circles.push(circle);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.circles.len() + self.texts.len()
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.rects.clear();
        self.circles.clear();
        self.texts.clear();
    }
}

/// Retained chart scene: one primitive list per layer, each layer rebuilt
/// on its own schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    /// Surface fill painted under every layer.
    pub background: Option<Color>,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stack(viewport: Viewport, stack: LayerStack) -> Self {
        let layers = stack
            .layers
            .into_iter()
            .map(LayerPrimitives::empty)
            .collect();
        Self {
            viewport,
            background: None,
            layers,
        }
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Clears `kind`, bumps its revision and lets `build` refill it.
    pub fn rebuild_layer(&mut self, kind: CanvasLayerKind, build: impl FnOnce(&mut LayerPrimitives)) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.clear();
            layer.revision += 1;
            build(layer);
        }
    }

    /// Empties every layer and drops the background; revisions keep counting.
    pub fn clear_all(&mut self) {
        self.background = None;
        for layer in &mut self.layers {
            layer.clear();
            layer.revision += 1;
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(LayerPrimitives::node_count).sum()
    }

    /// Draw list in stack order, so each layer paints over the ones below it.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        frame.background = self.background;
        for layer in &self.layers {
            append_layer(&mut frame, layer);
        }
        frame
    }
}

fn append_layer(frame: &mut RenderFrame, layer: &LayerPrimitives) {
    let commands = &mut frame.commands;
    commands.extend(layer.lines.iter().copied().map(DrawCommand::Line));
    commands.extend(layer.rects.iter().copied().map(DrawCommand::Rect));
    commands.extend(layer.circles.iter().copied().map(DrawCommand::Circle));
    commands.extend(layer.texts.iter().cloned().map(DrawCommand::Text));
}
