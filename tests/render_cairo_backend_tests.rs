#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_vibe::ChartError;
use chart_vibe::api::{
    AxisConfig, BarChartConfig, Chart, ChartConfig, ChartSpec, ScatterChartConfig,
};
use chart_vibe::core::{Orientation, Viewport};
use chart_vibe::interaction::PointerEvent;
use chart_vibe::render::{CairoContextRenderer, CairoRenderStats, CairoRenderer};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_bars_and_value_labels() {
    let spec = ChartSpec::new(
        ChartConfig::Vertical(BarChartConfig::default_for(Orientation::Vertical)),
        Viewport::new(800, 600),
    );
    let renderer = CairoRenderer::for_viewport(Viewport::new(800, 600)).expect("renderer");
    let mut chart = Chart::build(&spec, renderer, None).expect("chart");
    chart
        .handle_pointer(PointerEvent::Down { x: 170.0, y: 280.0 })
        .expect("down");

    let renderer = chart.into_surface();
    let stats = renderer.last_stats();
    // The background is a surface fill, so only the bar counts.
    assert_eq!(stats.rects_drawn, 1);
    // 11 gridlines, two axis lines, 11 value ticks and 4 category ticks.
    assert_eq!(stats.lines_drawn, 28);
    // Tick labels, category labels, both titles and the bar label.
    assert_eq!(stats.texts_drawn, 11 + 4 + 2 + 1);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn destroying_the_chart_resets_cairo_stats() {
    let spec = ChartSpec::new(
        ChartConfig::Horizontal(BarChartConfig::default_for(Orientation::Horizontal)),
        Viewport::new(640, 480),
    );
    let renderer = CairoRenderer::for_viewport(Viewport::new(640, 480))
        .expect("renderer")
        .with_font_family("Monospace");
    let mut chart = Chart::build(&spec, renderer, None).expect("chart");
    assert!(chart.surface().last_stats().lines_drawn > 0);

    chart.destroy().expect("destroy");
    assert_eq!(chart.surface().last_stats(), CairoRenderStats::default());
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let spec = ChartSpec::new(
        ChartConfig::Scatter(ScatterChartConfig::new(
            AxisConfig::numerical("x", 10.0),
            AxisConfig::categorical("y", ["a", "b", "c"]),
        )),
        Viewport::new(600, 320),
    );
    let mut chart =
        Chart::build(&spec, CairoRenderer::new(600, 320).expect("renderer"), None).expect("chart");
    chart
        .handle_pointer(PointerEvent::Click { x: 300.0, y: 130.0 })
        .expect("click");
    let frame = chart.scene().flatten();

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = chart.into_surface();
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().circles_drawn, 1);
}
