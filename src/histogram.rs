// segbench: Runtime Figures for the Semantic Segmentation Workflow Benchmark
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Histogram bin computation for the runtime distributions.

use serde::Serialize;

use crate::{Error, Result};

/// Number of bins per second of runtime for fixed-width binning.
pub const BINS_PER_UNIT: usize = 10;

/// Number of bins used to report histogram counts, and the default for fixed-count binning.
pub const DEFAULT_BIN_COUNT: usize = 1000;

/// How the bins of a histogram are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Binning {
    /// `BINS_PER_UNIT` bins per second, from the column minimum to the minimum plus the ceiling of
    /// the column range.
    #[default]
    FixedWidth,
    /// The given number of equally sized bins between the column minimum and maximum.
    FixedCount(usize),
}

/// Contiguous, equally sized bins from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bins {
    pub start: f64,
    pub end: f64,
    pub num_bins: usize,
}

impl Bins {
    /// Compute the bins for the values of `column` with the given strategy.
    pub fn new(binning: Binning, column: &str, values: &[f64]) -> Result<Self> {
        match binning {
            Binning::FixedWidth => Self::fixed_width(column, values),
            Binning::FixedCount(n) => Self::fixed_count(column, values, n),
        }
    }

    pub fn fixed_width(column: &str, values: &[f64]) -> Result<Self> {
        let (min, max) = domain(column, values)?;
        let max_increment = (max - min).ceil();
        let num_bins = (max_increment as usize)
            .checked_mul(BINS_PER_UNIT)
            .ok_or_else(|| Error::TooManyBins {
                column: column.to_string(),
                min,
                max,
            })?;
        if num_bins == 0 {
            return Err(Error::EmptyHistogramDomain {
                column: column.to_string(),
                min,
                max,
            });
        }
        Ok(Self {
            start: min,
            end: min + max_increment,
            num_bins,
        })
    }

    pub fn fixed_count(column: &str, values: &[f64], num_bins: usize) -> Result<Self> {
        let (min, max) = domain(column, values)?;
        if num_bins == 0 || max <= min {
            return Err(Error::EmptyHistogramDomain {
                column: column.to_string(),
                min,
                max,
            });
        }
        Ok(Self {
            start: min,
            end: max,
            num_bins,
        })
    }

    pub fn width(&self) -> f64 {
        (self.end - self.start) / self.num_bins as f64
    }

    /// All `num_bins + 1` bin edges, evenly spaced from `start` to `end`.
    pub fn edges(&self) -> Vec<f64> {
        let range = self.end - self.start;
        (0..=self.num_bins)
            .map(|i| self.start + range * i as f64 / self.num_bins as f64)
            .collect()
    }

    /// Number of values per bin. Bins are half-open except the last one, which includes `end`.
    /// Values outside of `[start, end]` are not counted.
    pub fn counts(&self, values: &[f64]) -> Vec<usize> {
        let mut counts = vec![0; self.num_bins];
        let width = self.width();
        for x in values.iter().filter(|x| **x >= self.start && **x <= self.end) {
            let idx = (((x - self.start) / width).floor() as usize).min(self.num_bins - 1);
            counts[idx] += 1;
        }
        counts
    }
}

/// Minimum and maximum of `values`, as long as both are finite.
pub fn domain(column: &str, values: &[f64]) -> Result<(f64, f64)> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(*x), hi.max(*x))
        });
    if !(min.is_finite() && max.is_finite()) {
        return Err(Error::EmptyHistogramDomain {
            column: column.to_string(),
            min,
            max,
        });
    }
    Ok((min, max))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::assert_close;

    #[test]
    fn fixed_width_bins() {
        let bins = Bins::fixed_width("x", &[0.25, 1.0, 2.1]).unwrap();
        assert_eq!(bins.start, 0.25);
        assert_close(bins.end, 2.25);
        assert_eq!(bins.num_bins, 20);
        assert_close(bins.width(), 0.1);
        let edges = bins.edges();
        assert_eq!(edges.len(), 21);
        assert_eq!(edges[0], 0.25);
        assert_close(edges[1], 0.35);
        assert_close(edges[20], 2.25);
    }

    #[test]
    fn fixed_count_bins() {
        let bins = Bins::new(Binning::FixedCount(4), "x", &[1.0, 3.0, 2.0]).unwrap();
        assert_eq!((bins.start, bins.end, bins.num_bins), (1.0, 3.0, 4));
        assert_close(bins.width(), 0.5);
    }

    #[test]
    fn counts_include_last_edge() {
        let values = [1.0, 1.2, 1.5, 2.9, 3.0];
        let bins = Bins::fixed_count("x", &values, 4).unwrap();
        assert_eq!(bins.counts(&values), vec![2, 1, 0, 2]);
        assert_eq!(bins.counts(&values).iter().sum::<usize>(), values.len());
    }

    #[test]
    fn huge_domain() {
        assert!(matches!(
            Bins::fixed_width("x", &[0.0, 1e300]),
            Err(Error::TooManyBins { min, max, .. }) if min == 0.0 && max == 1e300
        ));
        assert!(matches!(
            Bins::fixed_width("x", &[-f64::MAX, f64::MAX]),
            Err(Error::TooManyBins { .. })
        ));
        let bins = Bins::fixed_count("x", &[0.0, 1e300], 10).unwrap();
        assert_eq!(bins.num_bins, 10);
    }

    #[test]
    fn degenerate_domains() {
        assert!(matches!(
            Bins::fixed_width("x", &[]),
            Err(Error::EmptyHistogramDomain { .. })
        ));
        assert!(matches!(
            Bins::fixed_width("x", &[2.0, 2.0]),
            Err(Error::EmptyHistogramDomain { .. })
        ));
        assert!(matches!(
            Bins::fixed_count("x", &[2.0, 2.0], DEFAULT_BIN_COUNT),
            Err(Error::EmptyHistogramDomain { .. })
        ));
        assert!(matches!(
            Bins::fixed_width("x", &[1.0, f64::NAN]),
            Err(Error::EmptyHistogramDomain { .. })
        ));
    }
}
