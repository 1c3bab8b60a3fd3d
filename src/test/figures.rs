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
use std::fs;

use super::*;
use crate::{
    figure::{Figure, FigureConfig, ImageTimeVsGpu, MeanRuntimeVsGpu, PLOT_TITLE},
    histogram::Binning,
    records::SelectionKey,
    Error,
};

fn config(name: &str) -> FigureConfig {
    FigureConfig {
        output_dir: test_dir(name),
        ..Default::default()
    }
}

fn records() -> Vec<BenchmarkRecord> {
    let mut records = full_selection(5.0, 10_000, 40);
    records.extend(full_selection(0.5, 10_000, 25));
    records.push(record(5.0, 100_000, 4, 10));
    records
}

#[test]
fn histograms_for_every_gpu_count() {
    let records = records();
    let config = config("histograms");
    let dir = config.output_dir.clone();
    let mut fig = ImageTimeVsGpu::new(
        &records,
        SelectionKey::new(5.0, 10_000),
        PLOT_TITLE,
        "run",
        config,
    );
    let written = fig.plot().unwrap();

    let names = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "1GPU_run_10000images_5sdelay_image_runtimes.html",
            "4GPU_run_10000images_5sdelay_image_runtimes.html",
            "8GPU_run_10000images_5sdelay_image_runtimes.html",
        ]
    );
    for path in written.iter() {
        assert!(path.starts_with(&dir));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("Data Transfer Time"));
        assert!(html.contains("Tensorflow Serving Response Time"));
        assert!(html.contains("Postprocessing Runtime"));
    }
    assert_eq!(fig.data().unwrap().num_rows(), 120);
    assert_eq!(fig.output_path(4), written[1]);
}

#[test]
fn clipped_tail_and_fixed_count() {
    let records = records();
    let config = FigureConfig {
        clip_tail: true,
        binning: Binning::FixedCount(50),
        ..config("clipped")
    };
    let mut fig = ImageTimeVsGpu::new(
        &records,
        SelectionKey::new(0.5, 10_000),
        PLOT_TITLE,
        "run",
        config,
    );
    let written = fig.plot().unwrap();
    assert_eq!(written.len(), 3);
    assert!(written[0].ends_with("1GPU_run_10000images_0point5sdelay_image_runtimes.html"));
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn missing_selection_writes_nothing() {
    let records = records();
    let config = config("missing");
    let dir = config.output_dir.clone();
    let mut fig = ImageTimeVsGpu::new(
        &records,
        SelectionKey::new(5.0, 999),
        PLOT_TITLE,
        "run",
        config,
    );
    assert!(matches!(fig.plot(), Err(Error::MissingData(_))));
    assert_eq!(fs::read_dir(dir).unwrap().count(), 0);
}

#[test]
fn degenerate_column_writes_nothing() {
    let mut records = records();
    for r in records[6..9].iter_mut() {
        r.all_prediction_times = vec![2.0; 40];
    }
    let config = config("degenerate");
    let dir = config.output_dir.clone();
    let mut fig = ImageTimeVsGpu::new(
        &records,
        SelectionKey::new(5.0, 10_000),
        PLOT_TITLE,
        "run",
        config,
    );
    match fig.plot() {
        Err(Error::EmptyHistogramDomain { column, min, max }) => {
            assert_eq!(column, "8GPU_prediction");
            assert_eq!((min, max), (2.0, 2.0));
        }
        x => panic!("unexpected result: {x:?}"),
    }
    assert_eq!(fs::read_dir(dir).unwrap().count(), 0);
}

#[test]
fn confidence_interval_summary() {
    let records = records();
    let config = config("confidence");
    let mut fig = MeanRuntimeVsGpu::new(
        &records,
        SelectionKey::new(0.5, 10_000),
        PLOT_TITLE,
        "run",
        config,
    );
    let written = fig.plot().unwrap();
    assert_eq!(written, vec![fig.output_path()]);
    assert!(written[0].ends_with("run_10000images_0point5sdelay_mean_runtimes.html"));
    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("4GPU"));
}

#[test]
fn too_few_replicates() {
    let mut records = records();
    records.remove(0);
    let mut fig = MeanRuntimeVsGpu::new(
        &records,
        SelectionKey::new(5.0, 10_000),
        PLOT_TITLE,
        "run",
        config("replicates"),
    );
    assert!(matches!(
        fig.plot(),
        Err(Error::ReplicateCount {
            num_gpus: 1,
            found: 2,
            ..
        })
    ));
}
