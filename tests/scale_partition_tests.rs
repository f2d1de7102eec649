use approx::assert_relative_eq;
use chart_vibe::core::{AxisDomain, AxisScale, AxisValue, BandScale, LinearScale};
use proptest::prelude::*;

fn labels(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("c{index}")).collect()
}

#[test]
fn band_geometry_matches_padding_formula() {
    let scale = BandScale::new(labels(4), 700.0, 0.2, false).expect("band scale");
    assert_relative_eq!(scale.step(), 700.0 / 4.2, epsilon = 1e-9);
    assert_relative_eq!(scale.bandwidth(), scale.step() * 0.8, epsilon = 1e-9);
    assert_relative_eq!(
        scale.padding_width(),
        700.0 - 4.0 * scale.bandwidth(),
        epsilon = 1e-9
    );
    assert_relative_eq!(scale.center(0).expect("center"), 100.0, epsilon = 1e-9);
    assert_relative_eq!(scale.center(3).expect("center"), 600.0, epsilon = 1e-9);
}

#[test]
fn band_edges_are_inclusive_and_padding_maps_to_none() {
    let scale = BandScale::new(labels(4), 700.0, 0.2, false).expect("band scale");
    let first_start = scale.band_start(0).expect("start");
    let first_end = first_start + scale.bandwidth();
    assert_eq!(scale.band_for(first_start), Some(0));
    assert_eq!(scale.band_for(first_end), Some(0));
    assert_eq!(scale.band_for(first_end + 1.0), None);
    assert_eq!(scale.band_for(first_start - 1.0), None);
    assert_eq!(scale.band_for(-5.0), None);
    assert_eq!(scale.band_for(701.0), None);
    assert_eq!(scale.band_for(f64::NAN), None);
}

#[test]
fn reversed_bands_put_the_first_category_at_the_far_end() {
    let scale = BandScale::new(
        vec!["Low".to_owned(), "Medium".to_owned(), "High".to_owned()],
        520.0,
        0.1,
        true,
    )
    .expect("band scale");
    let low = scale.center(0).expect("low center");
    let high = scale.center(2).expect("high center");
    assert!(low > high);
    assert_eq!(scale.category_for(low), Some("Low"));
    assert_eq!(scale.category_for(high), Some("High"));
}

#[test]
fn continuous_axis_rejects_values_outside_the_domain() {
    let scale = AxisScale::from_domain(
        &AxisDomain::Continuous { upper_bound: 100.0 },
        700.0,
        false,
        0.1,
    )
    .expect("axis scale");
    assert_eq!(scale.value_at(350.0), Some(AxisValue::Number(50.0)));
    assert_eq!(scale.value_at(1050.0), None);
    assert_eq!(scale.value_at(-1.0), None);
}

#[test]
fn invalid_scales_are_rejected() {
    assert!(BandScale::new(Vec::new(), 100.0, 0.2, false).is_err());
    assert!(BandScale::new(labels(2), 0.0, 0.2, false).is_err());
    assert!(BandScale::new(labels(2), 100.0, 1.0, false).is_err());
    assert!(LinearScale::from_upper_bound(0.0, 100.0, false).is_err());
    assert!(
        AxisScale::from_domain(
            &AxisDomain::Continuous {
                upper_bound: f64::INFINITY
            },
            100.0,
            false,
            0.1
        )
        .is_err()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn uncovered_width_equals_configured_padding(
        count in 1usize..24,
        extent in 50.0f64..3000.0,
        padding in 0.0f64..0.9,
    ) {
        let scale = BandScale::new(labels(count), extent, padding, false).expect("band scale");
        let expected = scale.step() * padding * (count as f64 + 1.0);
        prop_assert!((scale.padding_width() - expected).abs() <= 1e-6 * extent);

        let samples = 2000usize;
        let pixel_width = extent / samples as f64;
        let uncovered = (0..samples)
            .map(|index| (index as f64 + 0.5) * pixel_width)
            .filter(|pixel| scale.band_for(*pixel).is_none())
            .count() as f64
            * pixel_width;
        // Sampling error is at most one sample per band edge.
        prop_assert!((uncovered - expected).abs() <= pixel_width * (2.0 * count as f64 + 2.0));
    }

    #[test]
    fn every_pixel_maps_to_at_most_its_own_band(
        count in 1usize..16,
        extent in 50.0f64..2000.0,
        padding in 0.0f64..0.9,
        pixel in 0.0f64..2000.0,
    ) {
        let scale = BandScale::new(labels(count), extent, padding, false).expect("band scale");
        if let Some(index) = scale.band_for(pixel) {
            let start = scale.band_start(index).expect("start");
            prop_assert!(pixel >= start - 1e-9);
            prop_assert!(pixel <= start + scale.bandwidth() + 1e-9);
        }
    }

    #[test]
    fn linear_round_trip_is_stable(
        upper in 1.0f64..1.0e6,
        extent in 10.0f64..4000.0,
        inverted in any::<bool>(),
        ratio in 0.0f64..1.0,
    ) {
        let scale = LinearScale::from_upper_bound(upper, extent, inverted).expect("scale");
        let value = upper * ratio;
        let back = scale.to_domain(scale.to_pixel(value));
        prop_assert!((back - value).abs() <= 1e-9 * upper.max(1.0));
    }
}
