use chart_vibe::api::{BarChartConfig, Chart, ChartConfig, ChartSpec};
use chart_vibe::core::{
    AxisDomain, BandScale, LinearScale, Margins, PlotArea, ScatterMapper, ScreenPoint, Viewport,
};
use chart_vibe::interaction::PointerEvent;
use chart_vibe::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::from_upper_bound(10_000.0, 1_080.0, true).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.to_pixel(black_box(4_321.123));
            let _ = scale.to_domain(px);
        })
    });
}

fn bench_band_lookup_64(c: &mut Criterion) {
    let categories: Vec<String> = (0..64).map(|i| format!("category-{i}")).collect();
    let scale = BandScale::new(categories, 1_920.0, 0.2, false).expect("valid band scale");

    c.bench_function("band_lookup_64", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for px in 0..1_920 {
                if scale.band_for(black_box(f64::from(px))).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
}

fn bench_scatter_resolve(c: &mut Criterion) {
    let plot = PlotArea::from_viewport(Viewport::new(1_600, 900), Margins::default())
        .expect("plot area");
    let x = AxisDomain::Continuous { upper_bound: 100.0 };
    let y = AxisDomain::Categorical {
        categories: vec!["Low".to_owned(), "Medium".to_owned(), "High".to_owned()],
    };
    let mapper = ScatterMapper::new(plot, &x, &y, 0.1).expect("scatter mapper");

    c.bench_function("scatter_resolve", |b| {
        b.iter(|| mapper.resolve(black_box(ScreenPoint::new(812.4, 433.0))))
    });
}

fn bench_bar_drag_1k_moves(c: &mut Criterion) {
    let spec = ChartSpec::new(
        ChartConfig::Vertical(BarChartConfig::new(
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "d".to_owned()],
            1_000.0,
        )),
        Viewport::new(1_600, 900),
    );
    let mut chart = Chart::build(&spec, NullRenderer::default(), None).expect("chart build");
    chart
        .handle_pointer(PointerEvent::Down { x: 300.0, y: 600.0 })
        .expect("pointer down");

    c.bench_function("bar_drag_1k_moves", |b| {
        b.iter(|| {
            for step in 0..1_000 {
                let y = 100.0 + f64::from(step % 700);
                let _ = chart
                    .handle_pointer(black_box(PointerEvent::Move { x: 300.0, y }))
                    .expect("pointer move");
            }
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_band_lookup_64,
    bench_scatter_resolve,
    bench_bar_drag_1k_moves
);
criterion_main!(benches);
