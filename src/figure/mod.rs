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
//! Figures rendered from the benchmark records.
//!
//! Every figure selects the runs of one `SelectionKey`, reshapes them into a `MetricTable` and
//! writes one or more plotly figures into the configured output directory. All plots of a figure
//! are built before the first file is written, such that a failing selection leaves no partial
//! output behind.
use std::path::{Path, PathBuf};

use plotly::{
    color::Rgba,
    common::{Font, Title},
    layout::{Axis, GridPattern, LayoutGrid},
    Layout, Plot,
};
use serde::Serialize;

use crate::{
    histogram::Binning,
    records::{BenchmarkRecord, Metric, SelectionKey, REPLICATES},
    table::MetricTable,
    util::PathBufExt,
    Error, Result,
};

pub mod axis;
mod image_time;
mod mean_runtime;

pub use image_time::ImageTimeVsGpu;
pub use mean_runtime::MeanRuntimeVsGpu;

use axis::SubplotGrid;

/// Default title of all figures.
pub const PLOT_TITLE: &str = "Semantic Segmentation Workflow Component Runtime";

/// Metrics shown in the subplots, in subplot order.
pub const PLOTTED_METRICS: [Metric; 3] = [Metric::Network, Metric::Prediction, Metric::Postprocess];

/// File format of the written figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FigureFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// PDF document, requires the `pdf` feature.
    Pdf,
}

impl FigureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FigureFormat::Html => "html",
            FigureFormat::Pdf => "pdf",
        }
    }

    /// Fails if this build cannot export the format.
    pub fn check_supported(&self) -> Result<()> {
        match self {
            FigureFormat::Html => Ok(()),
            #[cfg(feature = "pdf")]
            FigureFormat::Pdf => Ok(()),
            #[cfg(not(feature = "pdf"))]
            FigureFormat::Pdf => Err(Error::UnsupportedFormat("pdf")),
        }
    }
}

/// Presentation settings shared by all figures.
#[derive(Debug, Clone, Serialize)]
pub struct FigureConfig {
    /// Directory where the figures are written to.
    pub output_dir: PathBuf,
    /// Font size of titles, labels and ticks.
    pub font_size: usize,
    /// Figure width in pixels.
    pub width: usize,
    /// Figure height in pixels.
    pub height: usize,
    pub binning: Binning,
    /// Cut off the distribution tails at the manually tuned axis ranges.
    pub clip_tail: bool,
    pub format: FigureFormat,
    /// Number of replicates expected per GPU count.
    pub replicates: usize,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./"),
            font_size: 16,
            width: 2000,
            height: 1000,
            binning: Binning::default(),
            clip_tail: false,
            format: FigureFormat::default(),
            replicates: REPLICATES,
        }
    }
}

impl FigureConfig {
    /// Layout with a transparent background, the configured size and fonts, and room for `grid`.
    pub fn layout(&self, title: &str, grid: SubplotGrid) -> Layout {
        Layout::new()
            .title(Title::from(title))
            .font(Font::new().size(self.font_size))
            .width(self.width)
            .height(self.height)
            .paper_background_color(Rgba::new(0, 0, 0, 0.0))
            .plot_background_color(Rgba::new(0, 0, 0, 0.0))
            .show_legend(false)
            .grid(
                LayoutGrid::new()
                    .rows(grid.rows)
                    .columns(grid.cols)
                    .pattern(GridPattern::Independent),
            )
    }

    /// Write `plot` to `path` in the configured format.
    pub fn write(&self, plot: &Plot, path: &Path) -> Result<()> {
        log::info!("Plotting {path:?}");
        match self.format {
            FigureFormat::Html => plot.write_html(path),
            #[cfg(feature = "pdf")]
            FigureFormat::Pdf => plot.write_image(
                path,
                plotly::ImageFormat::PDF,
                self.width,
                self.height,
                1.0,
            ),
            #[cfg(not(feature = "pdf"))]
            FigureFormat::Pdf => return Err(Error::UnsupportedFormat("pdf")),
        }
        Ok(())
    }
}

/// Place the axes of the `idx`-th subplot. `idx` must be smaller than 4.
pub(crate) fn with_subplot_axes(layout: Layout, idx: usize, x: Axis, y: Axis) -> Layout {
    match idx {
        0 => layout.x_axis(x).y_axis(y),
        1 => layout.x_axis2(x).y_axis2(y),
        2 => layout.x_axis3(x).y_axis3(y),
        _ => layout.x_axis4(x).y_axis4(y),
    }
}

/// Part of the file names identifying the injected delay, e.g. `5sdelay` or `0point5sdelay`.
pub fn delay_label(delay: f64) -> String {
    format!("{delay}sdelay").replace('.', "point")
}

/// Part of the file names identifying a selection, e.g. `run_10000images_0point5sdelay`.
pub fn selection_stem(label: &str, key: &SelectionKey) -> String {
    format!("{label}_{}images_{}", key.num_images, delay_label(key.delay))
}

/// A figure that can be rendered to files.
pub trait Figure {
    /// Build and write all plots of this figure, returning the written files.
    fn plot(&mut self) -> Result<Vec<PathBuf>>;
}

/// State shared by all figures of a single selection.
#[derive(Debug, Clone)]
pub struct BaseFigure<'a> {
    pub raw_data: &'a [BenchmarkRecord],
    pub key: SelectionKey,
    /// Title shown above the plots.
    pub title: String,
    /// Label all file names start with.
    pub label: String,
    pub config: FigureConfig,
}

impl<'a> BaseFigure<'a> {
    pub fn new(
        raw_data: &'a [BenchmarkRecord],
        key: SelectionKey,
        title: impl Into<String>,
        label: impl Into<String>,
        config: FigureConfig,
    ) -> Self {
        Self {
            raw_data,
            key,
            title: title.into(),
            label: label.into(),
            config,
        }
    }

    /// Select the relevant runs and reshape them into a table.
    pub fn refine_data(&self) -> Result<MetricTable> {
        MetricTable::from_records(self.raw_data, self.key, self.config.replicates)
    }

    /// Path of an output file: `{prefix}{label}_{images}images_{delay}_{suffix}.{ext}`.
    pub fn output_path(&self, prefix: &str, suffix: &str) -> PathBuf {
        self.config.output_dir.as_path().then(format!(
            "{prefix}{}_{suffix}.{}",
            selection_stem(&self.label, &self.key),
            self.config.format.extension()
        ))
    }
}
