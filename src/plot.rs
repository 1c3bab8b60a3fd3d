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
use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{builder::TypedValueParser, Parser, ValueEnum};
use itertools::iproduct;
use serde::Serialize;

use segbench::{
    figure::PLOT_TITLE,
    histogram::{Binning, DEFAULT_BIN_COUNT},
    prelude::*,
    records::REPLICATES,
    report::DEFAULT_LABEL,
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// JSON file containing an array of benchmark records.
    #[arg(short, long)]
    records: PathBuf,
    /// Overwrite the output path for plots.
    #[arg(short, long, default_value = "./")]
    output_path: PathBuf,
    /// Injected start delays (in seconds) to plot.
    #[arg(short, long, num_args = 1.., default_values_t = [5.0, 0.5])]
    delay: Vec<f64>,
    /// Numbers of processed images to plot.
    #[arg(short, long, num_args = 1.., default_values_t = [10_000, 100_000, 1_000_000])]
    num_images: Vec<u64>,
    /// Label that all file names start with.
    #[arg(short, long, default_value = DEFAULT_LABEL)]
    label: String,
    /// Title shown above the plots.
    #[arg(long, default_value = PLOT_TITLE)]
    title: String,
    /// Type of plot to generate.
    #[arg(short, long, value_enum, default_value_t = PlotType::Histograms)]
    plot_type: PlotType,
    /// Cut off the distribution tails at the manually tuned axis ranges.
    #[arg(long)]
    clip_tail: bool,
    /// How to choose the histogram bins.
    #[arg(long, value_enum, default_value_t = BinningType::FixedWidth)]
    binning: BinningType,
    /// Number of bins when using `--binning fixed-count`.
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    bin_count: usize,
    /// Number of replicates expected per GPU count.
    #[arg(long, default_value_t = REPLICATES, value_parser = clap::value_parser!(u64).range(1..).map(|x| x as usize))]
    replicates: usize,
    /// Font size of titles, labels and ticks.
    #[arg(long, default_value_t = 16)]
    font_size: usize,
    /// Also write the reshaped table of each selection as CSV.
    #[arg(long)]
    export_csv: bool,
    /// File format of the figures.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
enum BinningType {
    /// Ten bins per second.
    #[default]
    FixedWidth,
    /// `--bin-count` bins between the smallest and the largest value.
    FixedCount,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Format {
    #[default]
    Html,
    /// Requires building with the `pdf` feature.
    Pdf,
}

impl Args {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            plot_type: self.plot_type,
            title: self.title.clone(),
            label: self.label.clone(),
            export_csv: self.export_csv,
            config: FigureConfig {
                output_dir: self.output_path.clone(),
                font_size: self.font_size,
                binning: match self.binning {
                    BinningType::FixedWidth => Binning::FixedWidth,
                    BinningType::FixedCount => Binning::FixedCount(self.bin_count),
                },
                clip_tail: self.clip_tail,
                format: match self.format {
                    Format::Html => FigureFormat::Html,
                    Format::Pdf => FigureFormat::Pdf,
                },
                replicates: self.replicates,
                ..Default::default()
            },
        }
    }
}

fn main() -> Result<()> {
    util::init_logging();

    let args = Args::parse();
    fs::create_dir_all(&args.output_path)
        .with_context(|| format!("Cannot create output directory {:?}", args.output_path))?;

    let records = load_records(&args.records)
        .with_context(|| format!("Could not read records in {:?}", args.records))?;

    let keys = iproduct!(args.delay.iter().copied(), args.num_images.iter().copied())
        .map(|(delay, num_images)| SelectionKey::new(delay, num_images));
    let report = plot_selections(&records, keys, &args.report_options());
    log::info!("Wrote {} files to {:?}", report.written.len(), args.output_path);

    if !report.is_complete() {
        bail!(
            "{} of {} selections could not be plotted",
            report.failed.len(),
            args.delay.len() * args.num_images.len()
        );
    }
    Ok(())
}
