use crate::core::{
    AxisScale, BandScale, BarMapper, LinearScale, Orientation, PlotArea, ScatterMapper,
    ScatterPoint,
};
use crate::render::{
    CirclePrimitive, LayerPrimitives, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::ChartStyle;
use super::label_format::format_value_label;

const AXIS_STROKE_WIDTH: f64 = 1.0;
const GRID_STROKE_WIDTH: f64 = 1.0;
const TICK_SIZE_PX: f64 = 6.0;
const TICK_LABEL_GAP_PX: f64 = 3.0;
/// Distance of the x-axis title above the bottom edge of the surface.
const X_TITLE_BOTTOM_OFFSET_PX: f64 = 20.0;
/// Horizontal position of the rotated y-axis title.
const Y_TITLE_X_PX: f64 = 20.0;

/// Axis titles for both chart kinds.
pub(super) struct AxisTitles<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

/// Gridlines across the plot at every value tick.
pub(super) fn build_bar_grid(
    layer: &mut LayerPrimitives,
    mapper: &BarMapper,
    style: &ChartStyle,
) {
    let plot = mapper.plot();
    let scale = mapper.value_scale();
    for tick in scale.ticks(style.tick_count) {
        let pixel = scale.to_pixel(tick);
        let line = match mapper.orientation() {
            Orientation::Vertical => LinePrimitive::new(
                plot.left,
                plot.top + pixel,
                plot.right(),
                plot.top + pixel,
                GRID_STROKE_WIDTH,
                style.grid_color,
            ),
            Orientation::Horizontal => LinePrimitive::new(
                plot.left + pixel,
                plot.top,
                plot.left + pixel,
                plot.bottom(),
                GRID_STROKE_WIDTH,
                style.grid_color,
            ),
        };
        layer.push_line(line);
    }
}

/// Value axis, category axis and both titles.
pub(super) fn build_bar_axes(
    layer: &mut LayerPrimitives,
    mapper: &BarMapper,
    titles: &AxisTitles<'_>,
    style: &ChartStyle,
) {
    let plot = mapper.plot();
    match mapper.orientation() {
        Orientation::Vertical => {
            push_bottom_band_axis(layer, plot, mapper.category_scale(), style);
            push_left_linear_axis(layer, plot, mapper.value_scale(), style);
        }
        Orientation::Horizontal => {
            push_bottom_linear_axis(layer, plot, mapper.value_scale(), style);
            push_left_band_axis(layer, plot, mapper.category_scale(), style);
        }
    }
    push_axis_titles(layer, plot, titles, style);
}

/// Axes for a scatter chart; numeric axes get ticks, categorical axes get
/// one label per band. No gridlines.
pub(super) fn build_scatter_axes(
    layer: &mut LayerPrimitives,
    mapper: &ScatterMapper,
    titles: &AxisTitles<'_>,
    style: &ChartStyle,
) {
    let plot = mapper.plot();
    match mapper.x_scale() {
        AxisScale::Linear(scale) => push_bottom_linear_axis(layer, plot, *scale, style),
        AxisScale::Band(scale) => push_bottom_band_axis(layer, plot, scale, style),
    }
    match mapper.y_scale() {
        AxisScale::Linear(scale) => push_left_linear_axis(layer, plot, *scale, style),
        AxisScale::Band(scale) => push_left_band_axis(layer, plot, scale, style),
    }
    push_axis_titles(layer, plot, titles, style);
}

/// One bar and its value label per non-zero entry.
pub(super) fn build_bar_marks<'a>(
    layer: &mut LayerPrimitives,
    mapper: &BarMapper,
    values: impl Iterator<Item = (&'a str, f64)>,
    style: &ChartStyle,
) {
    for (index, (_, value)) in values.enumerate() {
        if value <= 0.0 {
            continue;
        }
        if let Some(rect) = mapper.bar_rect(index, value) {
            layer.push_rect(RectPrimitive::new(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                style.bar_fill,
            ));
        }
        if let Some(anchor) = mapper.value_label_anchor(index, value) {
            let baseline = match mapper.orientation() {
                Orientation::Vertical => anchor.y,
                Orientation::Horizontal => anchor.y + style.value_font_size_px * 0.35,
            };
            layer.push_text(TextPrimitive::new(
                format_value_label(value),
                anchor.x,
                baseline,
                style.value_font_size_px,
                style.foreground,
                anchor.h_align,
            ));
        }
    }
}

/// Preview of bar `index` at `value`, drawn over the marks.
pub(super) fn build_bar_highlight(
    layer: &mut LayerPrimitives,
    mapper: &BarMapper,
    index: usize,
    value: f64,
    style: &ChartStyle,
) {
    if let Some(rect) = mapper.bar_rect(index, value) {
        layer.push_rect(
            RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, style.highlight_fill)
                .with_border(AXIS_STROKE_WIDTH, style.foreground.with_alpha(0.4)),
        );
    }
}

pub(super) fn build_scatter_marks(
    layer: &mut LayerPrimitives,
    mapper: &ScatterMapper,
    points: &[ScatterPoint],
    style: &ChartStyle,
) {
    for point in points {
        if let Some(position) = mapper.position_of(point) {
            layer.push_circle(CirclePrimitive::new(
                position.x,
                position.y,
                style.point_radius,
                style.point_fill,
            ));
        }
    }
}

fn push_bottom_linear_axis(
    layer: &mut LayerPrimitives,
    plot: PlotArea,
    scale: LinearScale,
    style: &ChartStyle,
) {
    let y = plot.bottom();
    push_axis_line(layer, plot.left, y, plot.right(), y, style);
    for tick in scale.ticks(style.tick_count) {
        let x = plot.left + scale.to_pixel(tick);
        push_bottom_tick(layer, x, y, format_value_label(tick), style);
    }
}

fn push_bottom_band_axis(
    layer: &mut LayerPrimitives,
    plot: PlotArea,
    scale: &BandScale,
    style: &ChartStyle,
) {
    let y = plot.bottom();
    push_axis_line(layer, plot.left, y, plot.right(), y, style);
    for (index, category) in scale.categories().iter().enumerate() {
        if let Some(center) = scale.center(index) {
            push_bottom_tick(layer, plot.left + center, y, category.clone(), style);
        }
    }
}

fn push_left_linear_axis(
    layer: &mut LayerPrimitives,
    plot: PlotArea,
    scale: LinearScale,
    style: &ChartStyle,
) {
    let x = plot.left;
    push_axis_line(layer, x, plot.top, x, plot.bottom(), style);
    for tick in scale.ticks(style.tick_count) {
        let y = plot.top + scale.to_pixel(tick);
        push_left_tick(layer, x, y, format_value_label(tick), style);
    }
}

fn push_left_band_axis(
    layer: &mut LayerPrimitives,
    plot: PlotArea,
    scale: &BandScale,
    style: &ChartStyle,
) {
    let x = plot.left;
    push_axis_line(layer, x, plot.top, x, plot.bottom(), style);
    for (index, category) in scale.categories().iter().enumerate() {
        if let Some(center) = scale.center(index) {
            push_left_tick(layer, x, plot.top + center, category.clone(), style);
        }
    }
}

fn push_axis_line(
    layer: &mut LayerPrimitives,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    style: &ChartStyle,
) {
    layer.push_line(LinePrimitive::new(
        x1,
        y1,
        x2,
        y2,
        AXIS_STROKE_WIDTH,
        style.foreground,
    ));
}

fn push_bottom_tick(
    layer: &mut LayerPrimitives,
    x: f64,
    y: f64,
    label: String,
    style: &ChartStyle,
) {
    layer.push_line(LinePrimitive::new(
        x,
        y,
        x,
        y + TICK_SIZE_PX,
        AXIS_STROKE_WIDTH,
        style.foreground,
    ));
    if label.is_empty() {
        return;
    }
    layer.push_text(TextPrimitive::new(
        label,
        x,
        y + TICK_SIZE_PX + TICK_LABEL_GAP_PX + style.tick_font_size_px,
        style.tick_font_size_px,
        style.foreground,
        TextHAlign::Center,
    ));
}

fn push_left_tick(
    layer: &mut LayerPrimitives,
    x: f64,
    y: f64,
    label: String,
    style: &ChartStyle,
) {
    layer.push_line(LinePrimitive::new(
        x - TICK_SIZE_PX,
        y,
        x,
        y,
        AXIS_STROKE_WIDTH,
        style.foreground,
    ));
    if label.is_empty() {
        return;
    }
    layer.push_text(TextPrimitive::new(
        label,
        x - TICK_SIZE_PX - TICK_LABEL_GAP_PX,
        y + style.tick_font_size_px * 0.35,
        style.tick_font_size_px,
        style.foreground,
        TextHAlign::Right,
    ));
}

fn push_axis_titles(
    layer: &mut LayerPrimitives,
    plot: PlotArea,
    titles: &AxisTitles<'_>,
    style: &ChartStyle,
) {
    if !titles.x.is_empty() {
        layer.push_text(TextPrimitive::new(
            titles.x,
            plot.left + plot.width * 0.5,
            plot.bottom() + style.margins.bottom - X_TITLE_BOTTOM_OFFSET_PX,
            style.title_font_size_px,
            style.foreground,
            TextHAlign::Center,
        ));
    }
    if !titles.y.is_empty() {
        layer.push_text(
            TextPrimitive::new(
                titles.y,
                Y_TITLE_X_PX,
                plot.top + plot.height * 0.5,
                style.title_font_size_px,
                style.foreground,
                TextHAlign::Center,
            )
            .with_rotation(-90.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisTitles, build_bar_axes, build_bar_grid, build_bar_marks};
    use crate::api::ChartStyle;
    use crate::core::{BarMapper, Margins, Orientation, PlotArea, Viewport};
    use crate::render::{CanvasLayerKind, LayerStack, LayeredRenderFrame, TextHAlign};

    fn mapper(orientation: Orientation) -> BarMapper {
        let plot = PlotArea::from_viewport(Viewport::new(800, 600), Margins::default())
            .expect("plot area");
        let categories = ["Sales", "Marketing", "R&D", "Support"]
            .iter()
            .map(|label| (*label).to_owned())
            .collect();
        BarMapper::new(plot, orientation, categories, 1000.0, 0.2).expect("mapper")
    }

    #[test]
    fn vertical_grid_has_one_horizontal_line_per_tick() {
        let mapper = mapper(Orientation::Vertical);
        let style = ChartStyle::default();
        let mut scene =
            LayeredRenderFrame::from_stack(Viewport::new(800, 600), LayerStack::canonical());
        scene.rebuild_layer(CanvasLayerKind::Grid, |layer| {
            build_bar_grid(layer, &mapper, &style);
        });

        let grid = scene.layer(CanvasLayerKind::Grid).expect("grid layer");
        assert_eq!(grid.lines.len(), 11);
        assert!(grid.lines.iter().all(|line| line.y1 == line.y2));
    }

    #[test]
    fn axes_carry_category_labels_and_rotated_y_title() {
        let mapper = mapper(Orientation::Vertical);
        let style = ChartStyle::default();
        let titles = AxisTitles {
            x: "Categories",
            y: "Value",
        };
        let mut scene =
            LayeredRenderFrame::from_stack(Viewport::new(800, 600), LayerStack::canonical());
        scene.rebuild_layer(CanvasLayerKind::Axis, |layer| {
            build_bar_axes(layer, &mapper, &titles, &style);
        });

        let axis = scene.layer(CanvasLayerKind::Axis).expect("axis layer");
        assert!(axis.texts.iter().any(|text| text.text == "R&D"));
        assert!(axis.texts.iter().any(|text| text.text == "1,000"));
        let y_title = axis
            .texts
            .iter()
            .find(|text| text.text == "Value")
            .expect("y title");
        assert_eq!(y_title.rotation_deg, -90.0);
        assert_eq!(y_title.x, 20.0);
        let x_title = axis
            .texts
            .iter()
            .find(|text| text.text == "Categories")
            .expect("x title");
        assert_eq!(x_title.y, 600.0 - 20.0);
    }

    #[test]
    fn zero_bars_are_skipped_and_horizontal_labels_sit_right_of_the_bar() {
        let mapper = mapper(Orientation::Horizontal);
        let style = ChartStyle::default();
        let mut scene =
            LayeredRenderFrame::from_stack(Viewport::new(800, 600), LayerStack::canonical());
        let values = [("Sales", 0.0), ("Marketing", 750.0), ("R&D", 0.0), ("Support", 20.0)];
        scene.rebuild_layer(CanvasLayerKind::Marks, |layer| {
            build_bar_marks(layer, &mapper, values.into_iter(), &style);
        });

        let marks = scene.layer(CanvasLayerKind::Marks).expect("marks layer");
        assert_eq!(marks.rects.len(), 2);
        assert_eq!(marks.texts.len(), 2);
        assert_eq!(marks.texts[0].text, "750");
        assert_eq!(marks.texts[0].h_align, TextHAlign::Left);
        assert!(marks.texts[0].x > marks.rects[0].x + marks.rects[0].width);
    }
}
