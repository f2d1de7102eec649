use crate::error::{ChartError, ChartResult};

use super::{AxisConfig, BarChartConfig, ChartStyle, ScatterChartConfig};

/// Upper bound on requested value-axis ticks; the scale allocates one entry per tick.
const MAX_TICK_COUNT: usize = 100;

/// Splits a comma-separated label list.
///
/// Labels are trimmed, empty entries dropped and repeats removed, keeping the
/// first occurrence.
#[must_use]
pub fn parse_labels(raw: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in raw.split(',').map(str::trim).filter(|label| !label.is_empty()) {
        if !labels.iter().any(|known| known == label) {
            labels.push(label.to_owned());
        }
    }
    labels
}

pub(super) fn validate_bar_config(config: &BarChartConfig) -> ChartResult<()> {
    validate_labels("bar labels", &config.labels)?;
    validate_positive("maximum value", config.max_value)?;
    if let Some(limit) = config.total_sum_limit {
        validate_positive("total sum limit", limit)?;
    }
    Ok(())
}

pub(super) fn validate_scatter_config(config: &ScatterChartConfig) -> ChartResult<()> {
    validate_axis_config("x axis", &config.x_axis)?;
    validate_axis_config("y axis", &config.y_axis)
}

pub(super) fn validate_style(style: &ChartStyle) -> ChartResult<()> {
    for (name, padding) in [
        ("bar band padding", style.bar_band_padding),
        ("scatter band padding", style.scatter_band_padding),
    ] {
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must be in [0, 1)"
            )));
        }
    }
    for (name, size) in [
        ("point radius", style.point_radius),
        ("tick font size", style.tick_font_size_px),
        ("title font size", style.title_font_size_px),
        ("value font size", style.value_font_size_px),
    ] {
        validate_positive(name, size)?;
    }
    let margins = style.margins;
    for (name, margin) in [
        ("top margin", margins.top),
        ("right margin", margins.right),
        ("bottom margin", margins.bottom),
        ("left margin", margins.left),
    ] {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    if !(1..=MAX_TICK_COUNT).contains(&style.tick_count) {
        return Err(ChartError::InvalidConfig(format!(
            "tick count must be in 1..={MAX_TICK_COUNT}, got {}",
            style.tick_count
        )));
    }
    for (name, color) in [
        ("background", style.background),
        ("foreground", style.foreground),
        ("bar fill", style.bar_fill),
        ("point fill", style.point_fill),
        ("grid color", style.grid_color),
        ("highlight fill", style.highlight_fill),
    ] {
        color
            .validate()
            .map_err(|err| ChartError::InvalidConfig(format!("{name}: {err}")))?;
    }
    Ok(())
}

fn validate_axis_config(name: &str, axis: &AxisConfig) -> ChartResult<()> {
    match axis {
        AxisConfig::Numerical { max_value, .. } => {
            validate_positive(&format!("{name} maximum value"), *max_value)
        }
        AxisConfig::Categorical { values, .. } => {
            validate_labels(&format!("{name} categories"), values)
        }
    }
}

fn validate_labels(name: &str, labels: &[String]) -> ChartResult<()> {
    if labels.is_empty() {
        return Err(ChartError::InvalidConfig(format!(
            "{name} need at least one entry"
        )));
    }
    for (index, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must not contain empty entries"
            )));
        }
        if labels[..index].contains(label) {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must be unique, `{label}` repeats"
            )));
        }
    }
    Ok(())
}

fn validate_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} must be a positive number"
        )));
    }
    Ok(())
}
