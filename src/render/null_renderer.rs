use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry, and
/// it counts draw and teardown calls.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub render_calls: usize,
    pub clear_calls: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines().count();
        self.last_rect_count = frame.rects().count();
        self.last_circle_count = frame.circles().count();
        self.last_text_count = frame.texts().count();
        self.render_calls += 1;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.last_line_count = 0;
        self.last_rect_count = 0;
        self.last_circle_count = 0;
        self.last_text_count = 0;
        self.clear_calls += 1;
        Ok(())
    }
}
