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
//! Histograms of the per-image runtime of each workflow component.
use std::path::PathBuf;

use plotly::{
    common::{Marker, Title},
    histogram::Bins as PlotlyBins,
    layout::{Axis, RangeMode},
    Histogram, Plot,
};

use super::{
    axis::{axis_maxima, axis_ref, clipped_ticks, full_ticks, SubplotGrid},
    with_subplot_axes, BaseFigure, Figure, FigureConfig, PLOTTED_METRICS,
};
use crate::{
    histogram::{self, Binning, Bins, DEFAULT_BIN_COUNT},
    palette,
    records::{BenchmarkRecord, SelectionKey, GPU_COUNTS},
    table::{Column, MetricTable},
    Result,
};

const X_LABEL: &str = "Time (s)";
const Y_LABEL: &str = "Counts";

/// One figure per GPU count, showing the distribution of the network, prediction and
/// postprocessing time of every image.
#[derive(Debug, Clone)]
pub struct ImageTimeVsGpu<'a> {
    base: BaseFigure<'a>,
    data: Option<MetricTable>,
}

impl<'a> ImageTimeVsGpu<'a> {
    pub fn new(
        raw_data: &'a [BenchmarkRecord],
        key: SelectionKey,
        title: impl Into<String>,
        label: impl Into<String>,
        config: FigureConfig,
    ) -> Self {
        Self {
            base: BaseFigure::new(raw_data, key, title, label, config),
            data: None,
        }
    }

    /// Table used by the last call to `plot`.
    pub fn data(&self) -> Option<&MetricTable> {
        self.data.as_ref()
    }

    /// Path of the figure showing `num_gpus`.
    pub fn output_path(&self, num_gpus: u32) -> PathBuf {
        self.base
            .output_path(&format!("{}_", Column::gpu_label(num_gpus)), "image_runtimes")
    }

    fn gpu_plot(base: &BaseFigure, table: &MetricTable, num_gpus: u32) -> Result<Plot> {
        let config = &base.config;
        let grid = SubplotGrid::for_count(PLOTTED_METRICS.len())?;
        let mut layout = config.layout(&format!("{}: {num_gpus} GPU", base.title), grid);

        let clipped = if config.clip_tail {
            let maxima = axis_maxima(base.key.num_images, num_gpus);
            if maxima.is_none() {
                log::warn!(
                    "No axis ranges known for {} images with {num_gpus} GPUs, showing the full distribution.",
                    base.key.num_images
                );
            }
            maxima
        } else {
            None
        };

        let mut plot = Plot::new();
        for (idx, metric) in PLOTTED_METRICS.iter().enumerate() {
            let column = Column::new(num_gpus, *metric);
            let name = column.to_string();
            let values = table.column(&column)?;
            let (row, col) = grid.position(idx);
            log::debug!("Creating plot {name} in position {row},{col}.");

            let report = Bins::fixed_count(&name, values, DEFAULT_BIN_COUNT)?;
            log::debug!(
                "Sum of {DEFAULT_BIN_COUNT} bin histogram counts: {}",
                report.counts(values).iter().sum::<usize>()
            );
            let (_, data_max) = histogram::domain(&name, values)?;
            log::debug!("Max value in {name}: {data_max}");

            let bins = Bins::new(config.binning, &name, values)?;
            if let Binning::FixedCount(_) = config.binning {
                log::debug!("bin_width for {name}: {}", bins.width());
            }

            let (xmax, ticks) = match clipped {
                Some(maxima) => (maxima[idx], clipped_ticks(maxima[idx])),
                None => (data_max, full_ticks(data_max)),
            };

            plot.add_trace(
                Histogram::new(values.to_vec())
                    .name(&name)
                    .x_axis(&axis_ref("x", idx))
                    .y_axis(&axis_ref("y", idx))
                    .x_bins(PlotlyBins::new(bins.start, bins.end, bins.width()))
                    .marker(Marker::new().color(palette::trace_color(idx))),
            );

            let x = Axis::new()
                .title(Title::from(
                    format!("{}<br>{X_LABEL}", metric.title()).as_str(),
                ))
                .range(vec![0.0, xmax])
                .tick_values(ticks);
            let y = Axis::new()
                .title(Title::from(Y_LABEL))
                .range_mode(RangeMode::ToZero);
            layout = with_subplot_axes(layout, idx, x, y);
        }
        plot.set_layout(layout);
        Ok(plot)
    }
}

impl Figure for ImageTimeVsGpu<'_> {
    fn plot(&mut self) -> Result<Vec<PathBuf>> {
        self.base.config.format.check_supported()?;
        let table = self.base.refine_data()?;

        let plots = GPU_COUNTS
            .iter()
            .map(|num_gpus| {
                let plot = Self::gpu_plot(&self.base, &table, *num_gpus)?;
                Ok((self.output_path(*num_gpus), plot))
            })
            .collect::<Result<Vec<_>>>()?;
        self.data = Some(table);

        for (path, plot) in plots.iter() {
            self.base.config.write(plot, path)?;
        }
        Ok(plots.into_iter().map(|(path, _)| path).collect())
    }
}
