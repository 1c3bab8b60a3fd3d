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
//! Error type shared by the filtering, reshaping and rendering steps.

use segbench_utils::stats::StatsError;

use crate::records::{Metric, SelectionKey};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
    #[error("No benchmark record matches {0}.")]
    MissingData(SelectionKey),
    #[error("Expected {expected} replicates with {num_gpus} GPUs for {key}, found {found}.")]
    ReplicateCount {
        key: SelectionKey,
        num_gpus: u32,
        expected: usize,
        found: usize,
    },
    #[error("Replicate {replicate} with {num_gpus} GPUs for {key} has no {metric} times.")]
    EmptySeries {
        key: SelectionKey,
        num_gpus: u32,
        metric: Metric,
        replicate: usize,
    },
    #[error("Column {column} has no histogram domain (min: {min}, max: {max}).")]
    EmptyHistogramDomain { column: String, min: f64, max: f64 },
    #[error("Column {column} spans too many fixed-width bins (min: {min}, max: {max}).")]
    TooManyBins { column: String, min: f64, max: f64 },
    #[error("Column {0} does not exist.")]
    UnknownColumn(String),
    #[error("Column {column} has {replicates} replicates, replicate {replicate} does not exist.")]
    UnknownReplicate {
        column: String,
        replicate: usize,
        replicates: usize,
    },
    #[error("Cannot lay out {0} subplots.")]
    UnsupportedSubplotCount(usize),
    #[error("Figure export as {0} is not supported by this build. Enable the `pdf` feature.")]
    UnsupportedFormat(&'static str),
}
