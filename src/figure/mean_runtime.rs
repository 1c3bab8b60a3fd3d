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
//! Mean runtime of each workflow component per GPU count, with 95% confidence intervals.
use std::path::PathBuf;

use itertools::Itertools;
use plotly::{
    common::{ErrorData, ErrorType, Marker, Title},
    layout::{Axis, RangeMode},
    Bar, Plot,
};
use segbench_utils::stats::format_data_for_error_plotting;

use super::{
    axis::{axis_ref, SubplotGrid},
    with_subplot_axes, BaseFigure, Figure, FigureConfig, PLOTTED_METRICS,
};
use crate::{
    palette,
    records::{BenchmarkRecord, SelectionKey, GPU_COUNTS},
    table::{Column, MetricTable},
    Result,
};

/// One figure with a subplot per component, each showing a bar per GPU count.
#[derive(Debug, Clone)]
pub struct MeanRuntimeVsGpu<'a> {
    base: BaseFigure<'a>,
    data: Option<MetricTable>,
}

impl<'a> MeanRuntimeVsGpu<'a> {
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

    pub fn output_path(&self) -> PathBuf {
        self.base.output_path("", "mean_runtimes")
    }

    fn summary_plot(base: &BaseFigure, table: &MetricTable) -> Result<Plot> {
        let grid = SubplotGrid::for_count(PLOTTED_METRICS.len())?;
        let mut layout = base.config.layout(&base.title, grid);
        let gpu_labels = GPU_COUNTS.iter().map(|g| Column::gpu_label(*g)).collect_vec();

        let mut plot = Plot::new();
        for (idx, metric) in PLOTTED_METRICS.iter().enumerate() {
            let groups = GPU_COUNTS
                .iter()
                .map(|num_gpus| table.column(&Column::new(*num_gpus, *metric)))
                .collect::<Result<Vec<_>>>()?;
            let (means, half_widths) = format_data_for_error_plotting(&groups)?;
            for (gpu, (mean, hw)) in gpu_labels.iter().zip(means.iter().zip(half_widths.iter())) {
                log::debug!("{gpu}_{metric}: {mean:.4} +- {hw:.4}");
            }

            plot.add_trace(
                Bar::new(gpu_labels.clone(), means)
                    .name(metric.title())
                    .x_axis(&axis_ref("x", idx))
                    .y_axis(&axis_ref("y", idx))
                    .error_y(ErrorData::new(ErrorType::Data).array(half_widths))
                    .marker(Marker::new().color(palette::trace_color(idx))),
            );

            let x = Axis::new().title(Title::from(metric.title()));
            let y = Axis::new()
                .title(Title::from("Mean Time (s)"))
                .range_mode(RangeMode::ToZero);
            layout = with_subplot_axes(layout, idx, x, y);
        }
        plot.set_layout(layout);
        Ok(plot)
    }
}

impl Figure for MeanRuntimeVsGpu<'_> {
    fn plot(&mut self) -> Result<Vec<PathBuf>> {
        self.base.config.format.check_supported()?;
        let table = self.base.refine_data()?;
        let plot = Self::summary_plot(&self.base, &table)?;
        self.data = Some(table);
        let path = self.output_path();
        self.base.config.write(&plot, &path)?;
        Ok(vec![path])
    }
}
