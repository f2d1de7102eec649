use crate::error::{ChartError, ChartResult};

/// Partition of a pixel extent into one equal-width band per category.
///
/// `padding` is a fraction of the step applied between bands and at both
/// outer edges, so with `n` categories the uncovered width is
/// `step * padding * (n + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    categories: Vec<String>,
    extent: f64,
    padding: f64,
    reversed: bool,
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl BandScale {
    /// Builds bands over `[0, extent]`.
    ///
    /// With `reversed`, the first category occupies the far end of the range,
    /// which keeps it at the bottom of a vertical axis.
    pub fn new(
        categories: Vec<String>,
        extent: f64,
        padding: f64,
        reversed: bool,
    ) -> ChartResult<Self> {
        if categories.is_empty() {
            return Err(ChartError::InvalidData(
                "band scale needs at least one category".to_owned(),
            ));
        }
        if !extent.is_finite() || extent <= 0.0 {
            return Err(ChartError::InvalidData(
                "band scale extent must be finite and > 0".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be in [0, 1)".to_owned(),
            ));
        }

        let count = categories.len() as f64;
        let step = extent / (count + padding);
        let bandwidth = step * (1.0 - padding);
        let start = step * padding;

        Ok(Self {
            categories,
            extent,
            padding,
            reversed,
            step,
            bandwidth,
            start,
        })
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Total width of the extent that belongs to no band.
    #[must_use]
    pub fn padding_width(&self) -> f64 {
        self.extent - self.bandwidth * self.len() as f64
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|known| known == category)
    }

    #[must_use]
    pub fn band_start(&self, index: usize) -> Option<f64> {
        let slot = self.slot_of(index)?;
        Some(self.start + self.step * slot as f64)
    }

    #[must_use]
    pub fn center(&self, index: usize) -> Option<f64> {
        self.band_start(index)
            .map(|start| start + self.bandwidth * 0.5)
    }

    /// Index of the band containing `pixel`; band edges are inclusive.
    ///
    /// Returns `None` for padding and for anything outside the extent.
    #[must_use]
    pub fn band_for(&self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() {
            return None;
        }
        let relative = pixel - self.start;
        if relative < 0.0 {
            return None;
        }

        let last_slot = self.len() - 1;
        let slot = ((relative / self.step).floor() as usize).min(last_slot);
        let offset = relative - self.step * slot as f64;
        if offset > self.bandwidth {
            return None;
        }
        self.slot_of(slot)
    }

    #[must_use]
    pub fn category_for(&self, pixel: f64) -> Option<&str> {
        self.band_for(pixel)
            .map(|index| self.categories[index].as_str())
    }

    // Index and slot are mirror images when reversed, so one mapping serves both directions.
    fn slot_of(&self, index: usize) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        if self.reversed {
            Some(self.len() - 1 - index)
        } else {
            Some(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BandScale;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn bands_follow_category_order() {
        let scale = BandScale::new(labels(&["a", "b", "c", "d"]), 425.0, 0.25, false)
            .expect("band scale");
        assert_eq!(scale.step(), 100.0);
        assert_eq!(scale.bandwidth(), 75.0);
        assert_eq!(scale.band_start(0), Some(25.0));
        assert_eq!(scale.band_start(3), Some(325.0));
        assert_eq!(scale.category_for(60.0), Some("a"));
        assert_eq!(scale.category_for(399.0), Some("d"));
    }

    #[test]
    fn padding_maps_to_none() {
        let scale = BandScale::new(labels(&["a", "b", "c", "d"]), 425.0, 0.25, false)
            .expect("band scale");
        assert_eq!(scale.band_for(10.0), None);
        assert_eq!(scale.band_for(110.0), None);
        assert_eq!(scale.band_for(415.0), None);
        assert_eq!(scale.band_for(-1.0), None);
        assert_eq!(scale.band_for(500.0), None);
    }

    #[test]
    fn reversed_scale_puts_first_category_last() {
        let scale = BandScale::new(labels(&["low", "high"]), 210.0, 0.1, true)
            .expect("band scale");
        assert_eq!(scale.category_for(200.0), Some("low"));
        assert_eq!(scale.category_for(20.0), Some("high"));
    }

    #[test]
    fn zero_padding_covers_the_whole_extent() {
        let scale = BandScale::new(labels(&["a", "b"]), 100.0, 0.0, false).expect("band scale");
        assert_eq!(scale.band_for(0.0), Some(0));
        assert_eq!(scale.band_for(100.0), Some(1));
        assert_eq!(scale.padding_width(), 0.0);
    }
}
