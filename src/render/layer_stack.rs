use serde::{Deserialize, Serialize};

/// Logical layers of a chart surface, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Gridlines behind the marks.
    Grid,
    /// Axis ticks, tick labels and titles.
    Axis,
    /// Bars, points and value labels.
    Marks,
    /// Transient hover preview, always on top.
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Grid,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Marks,
                CanvasLayerKind::Highlight,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, LayerStack};

    #[test]
    fn highlight_sits_above_marks() {
        let stack = LayerStack::canonical();
        assert_eq!(
            stack.layers,
            vec![
                CanvasLayerKind::Grid,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Marks,
                CanvasLayerKind::Highlight,
            ]
        );
    }
}
