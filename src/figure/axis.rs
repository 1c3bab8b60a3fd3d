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
//! Axis ranges, ticks and subplot placement.

use serde::Serialize;

use crate::{Error, Result};

/// Manually tuned x maxima of the network, prediction and postprocess subplots, used to cut off the
/// long tail of the distributions. Returns `None` for image counts that were never tuned.
pub fn axis_maxima(num_images: u64, num_gpus: u32) -> Option<[f64; 3]> {
    match (num_images, num_gpus) {
        (1_000_000, 1) => Some([5.0, 25.0, 3.0]),
        (100_000, 1) => Some([14.0, 25.0, 3.0]),
        (10_000, 1) => Some([6.0, 25.0, 3.0]),
        (1_000_000 | 100_000 | 10_000, 4 | 8) => Some([5.0, 120.0, 3.0]),
        _ => None,
    }
}

/// Ticks at zero, a third, two thirds and the end of the axis, all but the last one rounded down.
pub fn clipped_ticks(xmax: f64) -> Vec<f64> {
    vec![0.0, (xmax / 3.0).trunc(), (2.0 * xmax / 3.0).trunc(), xmax]
}

/// Ticks at zero, a third, two thirds and the end of the axis, all rounded down.
pub fn full_ticks(xmax: f64) -> Vec<f64> {
    vec![
        0.0,
        (xmax / 3.0).trunc(),
        (2.0 * xmax / 3.0).trunc(),
        xmax.trunc(),
    ]
}

/// Placement of subplots on a grid, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubplotGrid {
    pub rows: usize,
    pub cols: usize,
}

impl SubplotGrid {
    /// Up to three subplots are placed in a single row, four on a 2x2 grid.
    pub fn for_count(n: usize) -> Result<Self> {
        match n {
            1..=3 => Ok(Self { rows: 1, cols: n }),
            4 => Ok(Self { rows: 2, cols: 2 }),
            _ => Err(Error::UnsupportedSubplotCount(n)),
        }
    }

    /// `(row, col)` of the `idx`-th subplot.
    pub fn position(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }
}

/// Name of the `idx`-th x or y axis as used by plotly traces: `x`, `x2`, `x3`, ...
pub fn axis_ref(prefix: &str, idx: usize) -> String {
    if idx == 0 {
        prefix.to_string()
    } else {
        format!("{prefix}{}", idx + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grid_positions() {
        let grid = SubplotGrid::for_count(4).unwrap();
        assert_eq!(
            (0..4).map(|i| grid.position(i)).collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
        let grid = SubplotGrid::for_count(3).unwrap();
        assert_eq!((grid.rows, grid.cols), (1, 3));
        assert_eq!(grid.position(2), (0, 2));
        assert!(SubplotGrid::for_count(0).is_err());
        assert!(SubplotGrid::for_count(5).is_err());
    }

    #[test]
    fn ticks() {
        assert_eq!(clipped_ticks(120.0), vec![0.0, 40.0, 80.0, 120.0]);
        assert_eq!(clipped_ticks(5.0), vec![0.0, 1.0, 3.0, 5.0]);
        assert_eq!(full_ticks(7.9), vec![0.0, 2.0, 5.0, 7.0]);
    }

    #[test]
    fn axis_table() {
        assert_eq!(axis_maxima(100_000, 1), Some([14.0, 25.0, 3.0]));
        assert_eq!(axis_maxima(10_000, 8), Some([5.0, 120.0, 3.0]));
        assert_eq!(axis_maxima(10_000, 2), None);
        assert_eq!(axis_maxima(500, 1), None);
    }

    #[test]
    fn axis_names() {
        assert_eq!(axis_ref("x", 0), "x");
        assert_eq!(axis_ref("y", 2), "y3");
    }
}
