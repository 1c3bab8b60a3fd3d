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
//! Colorblind-safe color palettes.

use plotly::color::Rgb;

/// RGB triple.
pub type Color = (u8, u8, u8);

/// Sky blue, bluish green, reddish purple, vermillion and orange (Wong, Nature Methods 2011).
pub const COLORBLIND: [Color; 5] = [
    (86, 180, 233),
    (0, 158, 115),
    (204, 121, 167),
    (213, 94, 0),
    (230, 159, 0),
];

/// The `idx`-th palette, i.e., `COLORBLIND` rotated to start at its `idx`-th color.
pub fn palette(idx: usize) -> Vec<Color> {
    let cut = idx % COLORBLIND.len();
    COLORBLIND[cut..]
        .iter()
        .chain(COLORBLIND[..cut].iter())
        .copied()
        .collect()
}

/// Color of a single-series trace drawn with palette `idx`, which is the first color of the palette.
pub fn trace_color(idx: usize) -> Rgb {
    let (r, g, b) = palette(idx)[0];
    Rgb::new(r, g, b)
}
