use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Tick values for one axis; axes rarely carry more than a dozen.
pub type Ticks = SmallVec<[f64; 16]>;

/// Continuous mapping between a numeric domain and a pixel range.
///
/// The range may be descending, which is how value axes that grow upward are
/// expressed (`range_start = extent`, `range_end = 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Scale for a `[0, upper_bound]` domain over `extent` pixels.
    ///
    /// With `inverted`, zero sits at `extent` and `upper_bound` at pixel 0.
    pub fn from_upper_bound(upper_bound: f64, extent: f64, inverted: bool) -> ChartResult<Self> {
        if inverted {
            Self::new(0.0, upper_bound, extent, 0.0)
        } else {
            Self::new(0.0, upper_bound, 0.0, extent)
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn to_domain(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (min, max) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        value >= min && value <= max
    }

    /// Round-number ticks covering the domain, roughly `count` of them.
    ///
    /// Steps are 1, 2 or 5 times a power of ten.
    #[must_use]
    pub fn ticks(self, count: usize) -> Ticks {
        let (min, max) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let mut ticks = Ticks::new();
        if count == 0 {
            ticks.push(min);
            return ticks;
        }

        let rough_step = (max - min) / count as f64;
        let magnitude = 10f64.powf(rough_step.log10().floor());
        let error = rough_step / magnitude;
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };
        let step = factor * magnitude;

        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        for index in first..=last {
            ticks.push(index as f64 * step);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn ticks_use_round_steps() {
        let scale = LinearScale::from_upper_bound(1000.0, 300.0, true).expect("scale");
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[10], 1000.0);

        let scale = LinearScale::from_upper_bound(7.0, 300.0, false).expect("scale");
        assert_eq!(scale.ticks(5).as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(scale.ticks(10).len(), 15);
    }

    #[test]
    fn zero_span_is_rejected() {
        assert!(LinearScale::new(0.0, 0.0, 0.0, 100.0).is_err());
        assert!(LinearScale::new(0.0, 10.0, 50.0, 50.0).is_err());
    }
}
