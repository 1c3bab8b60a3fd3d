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
//! Module defining the benchmark record data types and the selection of matching runs.
use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GPU counts that the workflow was benchmarked with, in ascending order.
pub const GPU_COUNTS: [u32; 3] = [1, 4, 8];

/// Number of replicates recorded for each configuration.
pub const REPLICATES: usize = 3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
/// Timing categories measured for every processed image. The declaration order is the column order
/// of the `MetricTable`.
pub enum Metric {
    Total,
    Network,
    Upload,
    Prediction,
    Postprocess,
    Download,
}

impl Metric {
    /// Name of the record field holding the time series of this metric.
    pub fn field_name(&self) -> String {
        format!("all_{self}_times")
    }

    /// Title of a subplot showing this metric.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Total => "Total Runtime",
            Metric::Network => "Data Transfer Time",
            Metric::Upload => "Upload Time",
            Metric::Prediction => "Tensorflow Serving Response Time",
            Metric::Postprocess => "Postprocessing Runtime",
            Metric::Download => "Download Time",
        }
    }
}

/// One completed run of the workflow.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BenchmarkRecord {
    /// Delay injected before starting the run, in seconds
    pub start_delay: f64,
    /// Number of images processed during the run
    pub num_images: u64,
    /// Number of GPUs serving predictions
    pub num_gpus: u32,
    pub all_total_times: Vec<f64>,
    pub all_network_times: Vec<f64>,
    pub all_upload_times: Vec<f64>,
    pub all_prediction_times: Vec<f64>,
    pub all_postprocess_times: Vec<f64>,
    pub all_download_times: Vec<f64>,
}

impl BenchmarkRecord {
    /// Time series of the given metric, one entry per image.
    pub fn series(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Total => &self.all_total_times,
            Metric::Network => &self.all_network_times,
            Metric::Upload => &self.all_upload_times,
            Metric::Prediction => &self.all_prediction_times,
            Metric::Postprocess => &self.all_postprocess_times,
            Metric::Download => &self.all_download_times,
        }
    }

    /// Whether this run was recorded with the given selection key. Both fields must match exactly.
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, key: &SelectionKey) -> bool {
        self.start_delay == key.delay && self.num_images == key.num_images
    }
}

/// Key selecting the runs of a single figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionKey {
    /// Injected start delay, in seconds
    pub delay: f64,
    /// Number of processed images
    pub num_images: u64,
}

impl SelectionKey {
    pub fn new(delay: f64, num_images: u64) -> Self {
        Self { delay, num_images }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delay={}s, images={}", self.delay, self.num_images)
    }
}

/// Read all benchmark records from a JSON file containing an array of records.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>> {
    let path = path.as_ref();
    log::info!("Loading: {path:?}");
    let serialized = fs::read_to_string(path)?;
    let records: Vec<BenchmarkRecord> = serde_json::from_str(&serialized)?;
    log::debug!("Loaded {} records from {path:?}", records.len());
    Ok(records)
}

/// Select all runs matching `key`, keeping their input order.
pub fn filter_records<'a>(
    records: &'a [BenchmarkRecord],
    key: &SelectionKey,
) -> Result<Vec<&'a BenchmarkRecord>> {
    let selected: Vec<&BenchmarkRecord> = records.iter().filter(|r| r.matches(key)).collect();
    if selected.is_empty() {
        return Err(Error::MissingData(*key));
    }
    log::debug!("Selected {} of {} records for {key}", selected.len(), records.len());
    Ok(selected)
}
