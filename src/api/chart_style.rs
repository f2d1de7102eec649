use serde::{Deserialize, Serialize};

use crate::core::Margins;
use crate::error::ChartResult;
use crate::render::Color;

use super::validation::validate_style;

fn default_bar_band_padding() -> f64 {
    0.2
}

fn default_scatter_band_padding() -> f64 {
    0.1
}

fn default_point_radius() -> f64 {
    5.0
}

fn default_tick_font_size_px() -> f64 {
    12.0
}

fn default_title_font_size_px() -> f64 {
    14.0
}

fn default_value_font_size_px() -> f64 {
    12.0
}

fn default_tick_count() -> usize {
    10
}

fn default_background() -> Color {
    Color::rgb8(0x23, 0x39, 0x5d)
}

fn default_foreground() -> Color {
    Color::rgb8(0xfd, 0xfd, 0xfd)
}

fn default_bar_fill() -> Color {
    Color::rgb8(0xf9, 0xdc, 0x5c).with_alpha(0.7)
}

fn default_point_fill() -> Color {
    Color::rgb8(0xf9, 0xdc, 0x5c)
}

fn default_grid_color() -> Color {
    default_foreground().with_alpha(0.1)
}

fn default_highlight_fill() -> Color {
    default_foreground().with_alpha(0.1)
}

/// Layout and palette shared by every chart kind.
///
/// Every field has a serde default, so partial JSON styles are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_bar_band_padding")]
    pub bar_band_padding: f64,
    #[serde(default = "default_scatter_band_padding")]
    pub scatter_band_padding: f64,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_tick_font_size_px")]
    pub tick_font_size_px: f64,
    #[serde(default = "default_title_font_size_px")]
    pub title_font_size_px: f64,
    #[serde(default = "default_value_font_size_px")]
    pub value_font_size_px: f64,
    /// Approximate tick count requested from numeric axes.
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default = "default_bar_fill")]
    pub bar_fill: Color,
    #[serde(default = "default_point_fill")]
    pub point_fill: Color,
    #[serde(default = "default_grid_color")]
    pub grid_color: Color,
    #[serde(default = "default_highlight_fill")]
    pub highlight_fill: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            bar_band_padding: default_bar_band_padding(),
            scatter_band_padding: default_scatter_band_padding(),
            point_radius: default_point_radius(),
            tick_font_size_px: default_tick_font_size_px(),
            title_font_size_px: default_title_font_size_px(),
            value_font_size_px: default_value_font_size_px(),
            tick_count: default_tick_count(),
            background: default_background(),
            foreground: default_foreground(),
            bar_fill: default_bar_fill(),
            point_fill: default_point_fill(),
            grid_color: default_grid_color(),
            highlight_fill: default_highlight_fill(),
        }
    }
}

impl ChartStyle {
    pub fn validate(&self) -> ChartResult<()> {
        validate_style(self)
    }
}
