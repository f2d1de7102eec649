use std::fmt::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

/// Renders frames into a standalone SVG document held in memory.
///
/// The document is the visual surface: hosts embed it, write it to disk, or
/// diff it in tests. `clear` empties it.
#[derive(Debug, Default, Clone)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document; empty before the first render and after `clear`.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = frame.viewport.width,
            h = frame.viewport.height,
        )?;
        if let Some(background) = frame.background {
            writeln!(
                out,
                r#"  <rect width="100%" height="100%" fill="{}" fill-opacity="{:.3}"/>"#,
                css_rgb(background),
                background.alpha,
            )?;
        }

        for command in &frame.commands {
            match command {
                DrawCommand::Line(line) => write_line(&mut out, line)?,
                DrawCommand::Rect(rect) => write_rect(&mut out, rect)?,
                DrawCommand::Circle(circle) => write_circle(&mut out, circle)?,
                DrawCommand::Text(text) => write_text(&mut out, text)?,
            }
        }

        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = Self::write_frame(frame)
            .map_err(|_| ChartError::InvalidData("failed to format svg document".to_owned()))?;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.document.clear();
        Ok(())
    }
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    writeln!(
        out,
        r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}"/>"#,
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        css_rgb(line.color),
        line.color.alpha,
        line.stroke_width,
    )
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.3}""#,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        css_rgb(rect.fill_color),
        rect.fill_color.alpha,
    )?;
    if let Some(border) = rect.border {
        write!(
            out,
            r#" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}""#,
            css_rgb(border.color),
            border.color.alpha,
            border.width,
        )?;
    }
    writeln!(out, "/>")
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    writeln!(
        out,
        r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{:.3}"/>"#,
        circle.cx,
        circle.cy,
        circle.radius,
        css_rgb(circle.fill_color),
        circle.fill_color.alpha,
    )
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        out,
        r#"  <text x="{x:.2}" y="{y:.2}" font-size="{:.1}" fill="{}" fill-opacity="{:.3}" text-anchor="{anchor}""#,
        text.font_size_px,
        css_rgb(text.color),
        text.color.alpha,
        x = text.x,
        y = text.y,
    )?;
    if text.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({:.1} {:.2} {:.2})""#,
            text.rotation_deg, text.x, text.y
        )?;
    }
    writeln!(out, ">{}</text>", escape_xml(&text.text))
}

fn css_rgb(color: Color) -> String {
    let (red, green, blue) = color.to_rgb8();
    format!("#{red:02x}{green:02x}{blue:02x}")
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, escape_xml};
    use crate::core::Viewport;
    use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

    #[test]
    fn renders_and_clears_document() {
        let frame = RenderFrame::new(Viewport::new(200, 100))
            .with_background(Color::rgb8(0x23, 0x39, 0x5d))
            .with_rect(RectPrimitive::new(1.0, 2.0, 3.0, 4.0, Color::rgb8(0xf9, 0xdc, 0x5c)))
            .with_text(TextPrimitive::new(
                "R&D",
                10.0,
                20.0,
                12.0,
                Color::rgb(1.0, 1.0, 1.0),
                TextHAlign::Center,
            ));
        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");

        let document = renderer.document();
        assert!(document.starts_with("<svg"));
        assert!(document.contains(r##"<rect width="100%" height="100%" fill="#23395d""##));
        assert!(document.contains("fill=\"#f9dc5c\""));
        assert!(document.contains(">R&amp;D</text>"));

        renderer.clear().expect("clear");
        assert!(renderer.document().is_empty());
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("<a \"b\">"), "&lt;a &quot;b&quot;&gt;");
    }
}
