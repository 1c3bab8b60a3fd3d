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
//! Library for plotting the runtime of the semantic segmentation workflow benchmark.

pub mod error;
pub mod figure;
pub mod histogram;
pub mod palette;
pub mod records;
pub mod report;
pub mod table;
pub mod util;

#[cfg(test)]
mod test;

pub use error::{Error, Result};
pub use segbench_utils::stats;

pub mod prelude {
    pub use super::{
        figure::{Figure, FigureConfig, FigureFormat, ImageTimeVsGpu, MeanRuntimeVsGpu},
        records::{load_records, BenchmarkRecord, Metric, SelectionKey},
        report::{plot_selection, plot_selections, PlotType, Report, ReportOptions},
        table::{Column, MetricTable},
        Error, Result,
    };
}
