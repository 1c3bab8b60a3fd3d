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
//! Rendering the requested figures for a list of selections.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    figure::{
        selection_stem, Figure, FigureConfig, ImageTimeVsGpu, MeanRuntimeVsGpu, PLOT_TITLE,
    },
    records::{BenchmarkRecord, SelectionKey},
    table::MetricTable,
    util::PathBufExt,
    Error, Result,
};

/// Label all file names start with, unless configured otherwise.
pub const DEFAULT_LABEL: &str = "segmentation";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotType {
    /// Histograms of the per-image runtimes, one figure per GPU count.
    #[default]
    Histograms,
    /// Mean runtimes per GPU count with 95% confidence intervals.
    Confidence,
    /// All of the above.
    All,
}

impl PlotType {
    fn histograms(&self) -> bool {
        matches!(self, Self::Histograms | Self::All)
    }

    fn confidence(&self) -> bool {
        matches!(self, Self::Confidence | Self::All)
    }
}

/// What to render for every selection.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOptions {
    pub plot_type: PlotType,
    /// Title shown above the plots.
    pub title: String,
    /// Label all file names start with.
    pub label: String,
    /// Also write the reshaped table as CSV.
    pub export_csv: bool,
    pub config: FigureConfig,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            plot_type: PlotType::default(),
            title: PLOT_TITLE.to_string(),
            label: DEFAULT_LABEL.to_string(),
            export_csv: false,
            config: FigureConfig::default(),
        }
    }
}

impl ReportOptions {
    /// Path of the CSV export of a selection: `{label}_{images}images_{delay}_table.csv`.
    pub fn table_path(&self, key: &SelectionKey) -> PathBuf {
        self.config
            .output_dir
            .as_path()
            .then(format!("{}_table.csv", selection_stem(&self.label, key)))
    }
}

/// Outcome of rendering a list of selections.
#[derive(Debug, Default)]
pub struct Report {
    /// All files written, in the order of the selections.
    pub written: Vec<PathBuf>,
    /// Selections that were skipped, with the reason.
    pub failed: Vec<(SelectionKey, Error)>,
}

impl Report {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render all requested figures of a single selection. Fails on the first error.
pub fn plot_selection(
    records: &[BenchmarkRecord],
    key: SelectionKey,
    options: &ReportOptions,
) -> Result<Vec<PathBuf>> {
    let mut figures: Vec<Box<dyn Figure + '_>> = Vec::new();
    if options.plot_type.histograms() {
        figures.push(Box::new(ImageTimeVsGpu::new(
            records,
            key,
            &options.title,
            &options.label,
            options.config.clone(),
        )));
    }
    if options.plot_type.confidence() {
        figures.push(Box::new(MeanRuntimeVsGpu::new(
            records,
            key,
            &options.title,
            &options.label,
            options.config.clone(),
        )));
    }

    let mut written = Vec::new();
    for figure in figures.iter_mut() {
        written.extend(figure.plot()?);
    }

    if options.export_csv {
        let table = MetricTable::from_records(records, key, options.config.replicates)?;
        let path = options.table_path(&key);
        table.to_csv(&path)?;
        written.push(path);
    }
    Ok(written)
}

/// Render every selection in `keys`. A failing selection is logged and skipped, and the remaining
/// ones are still rendered.
pub fn plot_selections(
    records: &[BenchmarkRecord],
    keys: impl IntoIterator<Item = SelectionKey>,
    options: &ReportOptions,
) -> Report {
    let mut report = Report::default();
    for key in keys {
        log::info!("Plotting {key}");
        match plot_selection(records, key, options) {
            Ok(written) => {
                log::info!("Wrote {} files for {key}", written.len());
                report.written.extend(written);
            }
            Err(e) => {
                log::error!("Skipping {key}: {e}");
                report.failed.push((key, e));
            }
        }
    }
    report
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_paths() {
        let options = ReportOptions {
            label: "run".to_string(),
            config: FigureConfig {
                output_dir: PathBuf::from("/tmp/figures"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            options.table_path(&SelectionKey::new(0.5, 100_000)),
            PathBuf::from("/tmp/figures/run_100000images_0point5sdelay_table.csv")
        );
        assert_ne!(
            options.table_path(&SelectionKey::new(5.0, 10_000)),
            options.table_path(&SelectionKey::new(5.0, 1_000_000))
        );
    }

    #[test]
    fn plot_type_selection() {
        assert!(PlotType::Histograms.histograms() && !PlotType::Histograms.confidence());
        assert!(!PlotType::Confidence.histograms() && PlotType::Confidence.confidence());
        assert!(PlotType::All.histograms() && PlotType::All.confidence());
    }
}
