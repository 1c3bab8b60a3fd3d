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
//! Reshapes the time series of all replicates matching a selection into one rectangular table.
use std::{fmt, fs, io, path::Path};

use itertools::Itertools;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    records::{filter_records, BenchmarkRecord, Metric, SelectionKey, GPU_COUNTS},
    Error, Result,
};

/// Identifies a column of the `MetricTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Column {
    pub num_gpus: u32,
    pub metric: Metric,
}

impl Column {
    pub fn new(num_gpus: u32, metric: Metric) -> Self {
        Self { num_gpus, metric }
    }

    /// Prefix shared by all columns of the same GPU count, e.g. `4GPU`.
    pub fn gpu_label(num_gpus: u32) -> String {
        format!("{num_gpus}GPU")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::gpu_label(self.num_gpus), self.metric)
    }
}

/// Rectangular table of the per-image times of all replicates, with one column per GPU count and
/// metric. Each column stores the replicates one after the other, each padded to `series_len`
/// rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    key: SelectionKey,
    replicates: usize,
    series_len: usize,
    columns: Vec<Column>,
    data: Vec<Vec<f64>>,
}

impl MetricTable {
    /// Build the table for all `records` matching `key`. Every GPU count in `GPU_COUNTS` must have
    /// exactly `replicates` runs.
    pub fn from_records(
        records: &[BenchmarkRecord],
        key: SelectionKey,
        replicates: usize,
    ) -> Result<Self> {
        let selected = filter_records(records, &key)?;

        let groups = GPU_COUNTS
            .iter()
            .map(|num_gpus| {
                let runs = selected
                    .iter()
                    .copied()
                    .filter(|r| r.num_gpus == *num_gpus)
                    .collect_vec();
                if runs.len() != replicates {
                    return Err(Error::ReplicateCount {
                        key,
                        num_gpus: *num_gpus,
                        expected: replicates,
                        found: runs.len(),
                    });
                }
                Ok((*num_gpus, runs))
            })
            .collect::<Result<Vec<_>>>()?;

        for (num_gpus, runs) in groups.iter() {
            for metric in Metric::iter() {
                if let Some(replicate) = runs.iter().position(|r| r.series(metric).is_empty()) {
                    return Err(Error::EmptySeries {
                        key,
                        num_gpus: *num_gpus,
                        metric,
                        replicate,
                    });
                }
            }
        }

        let series_len = groups
            .iter()
            .flat_map(|(_, runs)| runs.iter())
            .flat_map(|r| Metric::iter().map(|m| r.series(m).len()))
            .max()
            .unwrap_or(0);

        let mut columns = Vec::with_capacity(GPU_COUNTS.len() * Metric::iter().len());
        let mut data = Vec::with_capacity(columns.capacity());
        for (num_gpus, runs) in groups.iter() {
            for metric in Metric::iter() {
                columns.push(Column::new(*num_gpus, metric));
                data.push(
                    runs.iter()
                        .flat_map(|r| pad_with_mean(r.series(metric), series_len))
                        .collect_vec(),
                );
            }
        }

        log::debug!(
            "Built table for {key} with {} columns and {} rows",
            columns.len(),
            series_len * replicates
        );

        Ok(Self {
            key,
            replicates,
            series_len,
            columns,
            data,
        })
    }

    /// Length every replicate is padded to.
    pub fn series_len(&self) -> usize {
        self.series_len
    }

    pub fn num_rows(&self) -> usize {
        self.series_len * self.replicates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names, in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.to_string()).collect()
    }

    /// All values of a column.
    pub fn column(&self, column: &Column) -> Result<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.data[i].as_slice())
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))
    }

    /// The padded rows of a single replicate in a column.
    pub fn replicate(&self, column: &Column, replicate: usize) -> Result<&[f64]> {
        let values = self.column(column)?;
        let len = self.series_len;
        replicate
            .checked_mul(len)
            .and_then(|start| values.get(start..start.checked_add(len)?))
            .ok_or_else(|| Error::UnknownReplicate {
                column: column.to_string(),
                replicate,
                replicates: self.replicates,
            })
    }

    /// Write the table as CSV with the column names as header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        csv.write_record(self.column_names())?;
        for row in 0..self.num_rows() {
            csv.write_record(self.data.iter().map(|col| col[row].to_string()))?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the table as CSV into the file at `path`, replacing it if it already exists.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::info!("Writing table for {} to {path:?}", self.key);
        self.write_csv(fs::File::create(path)?)
    }
}

/// Extend `series` to `len` entries by repeating its own mean. `series` must not be empty.
pub fn pad_with_mean(series: &[f64], len: usize) -> Vec<f64> {
    let mean = statrs::statistics::Statistics::mean(series);
    series
        .iter()
        .copied()
        .chain(std::iter::repeat(mean))
        .take(len.max(series.len()))
        .collect()
}
