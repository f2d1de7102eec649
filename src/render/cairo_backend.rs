use std::f64::consts::TAU;

use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

const DEFAULT_FONT_FAMILY: &str = "Sans";

/// Primitive counts from the most recent paint. The background fill is not
/// counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can also paint into a Cairo context owned by the host,
/// e.g. from a toolkit draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Offscreen ARGB32 chart surface painted with Cairo and Pango.
///
/// `clear` leaves the surface fully transparent, which is what a destroyed
/// chart looks like. `write_png` snapshots whatever is currently painted.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    font_family: String,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(format!(
                "cairo surface must be at least 1x1, got {width}x{height}"
            )));
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(cairo_error("create the image surface"))?;
        Ok(Self {
            surface,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Surface matching the chart viewport, as handed to a `ChartHost` factory.
    pub fn for_viewport(viewport: Viewport) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        let width = i32::try_from(viewport.width).map_err(|_| invalid())?;
        let height = i32::try_from(viewport.height).map_err(|_| invalid())?;
        Self::new(width, height)
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png<W: std::io::Write>(&self, stream: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(stream)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn paint(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        erase(context)?;
        if let Some(background) = frame.background {
            set_source(context, background);
            context.paint().map_err(cairo_error("paint the background"))?;
        }

        let mut stats = CairoRenderStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::Line(line) => {
                    stroke_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Rect(rect) => {
                    fill_rect(context, rect)?;
                    stats.rects_drawn += 1;
                }
                DrawCommand::Circle(circle) => {
                    fill_circle(context, circle)?;
                    stats.circles_drawn += 1;
                }
                DrawCommand::Text(text) => {
                    show_text(context, text, &self.font_family)?;
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }

    fn context(&self) -> ChartResult<Context> {
        Context::new(&self.surface).map_err(cairo_error("create a drawing context"))
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = self.context()?;
        self.paint(&context, frame)
    }

    fn clear(&mut self) -> ChartResult<()> {
        erase(&self.context()?)?;
        self.last_stats = CairoRenderStats::default();
        Ok(())
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.paint(context, frame)
    }
}

fn erase(context: &Context) -> ChartResult<()> {
    context.save().map_err(cairo_error("save state"))?;
    context.set_operator(Operator::Clear);
    context.paint().map_err(cairo_error("erase the surface"))?;
    context.restore().map_err(cairo_error("restore state"))
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    set_source(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context.stroke().map_err(cairo_error("stroke a line"))
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> ChartResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    set_source(context, rect.fill_color);
    let Some(border) = rect.border else {
        return context.fill().map_err(cairo_error("fill a rect"));
    };
    context.fill_preserve().map_err(cairo_error("fill a rect"))?;
    set_source(context, border.color);
    context.set_line_width(border.width);
    context.stroke().map_err(cairo_error("stroke a rect border"))
}

fn fill_circle(context: &Context, circle: &CirclePrimitive) -> ChartResult<()> {
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    set_source(context, circle.fill_color);
    context.fill().map_err(cairo_error("fill a circle"))
}

/// Text is anchored at its baseline; rotation turns it around the anchor.
fn show_text(context: &Context, text: &TextPrimitive, font_family: &str) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font = FontDescription::new();
    font.set_family(font_family);
    font.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let width = f64::from(layout.pixel_size().0);
    let offset_x = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -width / 2.0,
        TextHAlign::Right => -width,
    };
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    context.save().map_err(cairo_error("save state"))?;
    context.translate(text.x, text.y);
    if text.rotation_deg != 0.0 {
        context.rotate(text.rotation_deg.to_radians());
        pangocairo::functions::update_layout(context, &layout);
    }
    context.move_to(offset_x, -baseline);
    set_source(context, text.color);
    pangocairo::functions::show_layout(context, &layout);
    context.restore().map_err(cairo_error("restore state"))
}

fn set_source(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn cairo_error(action: &'static str) -> impl Fn(cairo::Error) -> ChartError {
    move |err| ChartError::InvalidData(format!("cairo failed to {action}: {err}"))
}
