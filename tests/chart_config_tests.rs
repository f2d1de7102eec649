use chart_vibe::api::{
    AxisConfig, BarChartConfig, ChartConfig, ChartKind, ChartSpec, ChartStyle,
    ScatterChartConfig, parse_labels,
};
use chart_vibe::core::{AxisDomain, Orientation, Viewport};
use chart_vibe::error::ChartError;

#[test]
fn parse_labels_trims_drops_empties_and_dedupes() {
    assert_eq!(
        parse_labels(" Sales, Marketing,,R&D , Sales,  ,Support"),
        vec!["Sales", "Marketing", "R&D", "Support"]
    );
    assert!(parse_labels(" , ,").is_empty());
}

#[test]
fn form_defaults_swap_axis_titles_with_orientation() {
    let vertical = BarChartConfig::default_for(Orientation::Vertical);
    assert_eq!(vertical.labels, vec!["Sales", "Marketing", "R&D", "Support"]);
    assert_eq!(vertical.max_value, 1000.0);
    assert_eq!(vertical.total_sum_limit, None);
    assert_eq!(
        (vertical.x_axis_label.as_str(), vertical.y_axis_label.as_str()),
        ("Categories", "Value")
    );

    let horizontal = BarChartConfig::default_for(Orientation::Horizontal);
    assert_eq!(
        (horizontal.x_axis_label.as_str(), horizontal.y_axis_label.as_str()),
        ("Value", "Categories")
    );
}

#[test]
fn bar_config_reads_camel_case_json() {
    let config: ChartConfig = serde_json::from_str(
        r#"{
            "kind": "horizontal",
            "labels": ["North", "South"],
            "maxValue": 250,
            "totalSumLimit": 300,
            "xAxisLabel": "Units",
            "yAxisLabel": "Region"
        }"#,
    )
    .expect("parse bar config");

    assert_eq!(config.kind(), ChartKind::Horizontal);
    assert_eq!(config.x_axis_label(), "Units");
    let ChartConfig::Horizontal(bar) = &config else {
        panic!("expected a horizontal bar config");
    };
    assert_eq!(bar.total_sum_limit, Some(300.0));
    assert_eq!(bar.value_domain(), AxisDomain::Continuous { upper_bound: 250.0 });
    assert!(config.validate().is_ok());
}

#[test]
fn scatter_axes_are_tagged_by_type() {
    let config: ChartConfig = serde_json::from_str(
        r#"{
            "kind": "scatter",
            "xAxis": { "type": "numerical", "label": "Score", "maxValue": 100 },
            "yAxis": { "type": "categorical", "label": "Level", "values": ["Low", "High"] }
        }"#,
    )
    .expect("parse scatter config");

    assert_eq!(
        config,
        ChartConfig::Scatter(ScatterChartConfig::new(
            AxisConfig::numerical("Score", 100.0),
            AxisConfig::categorical("Level", ["Low", "High"]),
        ))
    );
    assert_eq!(config.y_axis_label(), "Level");
    assert_eq!(config.kind().to_string(), "scatter");
}

#[test]
fn validation_rejects_bad_bar_setups() {
    let cases = [
        BarChartConfig::new(Vec::new(), 100.0),
        BarChartConfig::new(vec!["a".to_owned(), " ".to_owned()], 100.0),
        BarChartConfig::new(vec!["a".to_owned(), "a".to_owned()], 100.0),
        BarChartConfig::new(vec!["a".to_owned()], 0.0),
        BarChartConfig::new(vec!["a".to_owned()], f64::NAN),
        BarChartConfig::new(vec!["a".to_owned()], 10.0).with_total_sum_limit(-1.0),
    ];
    for config in cases {
        let err = config.validate().expect_err("invalid config");
        assert!(matches!(err, ChartError::InvalidConfig(_)), "{err}");
    }
}

#[test]
fn validation_rejects_bad_scatter_axes() {
    let empty_categories = ScatterChartConfig::new(
        AxisConfig::numerical("x", 10.0),
        AxisConfig::categorical("y", Vec::<String>::new()),
    );
    assert!(empty_categories.validate().is_err());

    let negative_max = ScatterChartConfig::new(
        AxisConfig::numerical("x", -5.0),
        AxisConfig::numerical("y", 10.0),
    );
    assert!(negative_max.validate().is_err());
}

#[test]
fn chart_spec_style_is_optional() {
    let spec: ChartSpec = serde_json::from_str(
        r#"{
            "config": { "kind": "vertical", "labels": ["a"], "maxValue": 5 },
            "viewport": { "width": 640, "height": 480 }
        }"#,
    )
    .expect("parse spec");
    assert_eq!(spec.viewport, Viewport::new(640, 480));
    assert_eq!(spec.style, ChartStyle::default());
}
