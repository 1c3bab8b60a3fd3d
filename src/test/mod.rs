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
//! Synthetic benchmark records and end-to-end tests of the figure generation.
//!
//! Use the following command to see the log output:
//!
//! ```shell
//! RUST_LOG=debug cargo test -- --nocapture --test-threads 1
//! ```

use crate::records::{BenchmarkRecord, Metric, GPU_COUNTS, REPLICATES};

mod figures;

/// Build a record whose series all have `len` entries. Each value lies between one and four times
/// the base time of its metric.
pub fn record(delay: f64, num_images: u64, num_gpus: u32, len: usize) -> BenchmarkRecord {
    let series = |metric: Metric| {
        let offset = match metric {
            Metric::Total => 5.0,
            Metric::Network => 0.4,
            Metric::Upload => 0.2,
            Metric::Prediction => 2.0,
            Metric::Postprocess => 1.0,
            Metric::Download => 0.1,
        };
        (0..len)
            .map(|i| offset + (i as f64 * 1.37 + num_gpus as f64 * 0.11) % 3.0 * offset)
            .collect::<Vec<f64>>()
    };
    BenchmarkRecord {
        start_delay: delay,
        num_images,
        num_gpus,
        all_total_times: series(Metric::Total),
        all_network_times: series(Metric::Network),
        all_upload_times: series(Metric::Upload),
        all_prediction_times: series(Metric::Prediction),
        all_postprocess_times: series(Metric::Postprocess),
        all_download_times: series(Metric::Download),
    }
}

/// All replicates of every GPU count for one selection key, ordered by GPU count.
pub fn full_selection(delay: f64, num_images: u64, len: usize) -> Vec<BenchmarkRecord> {
    GPU_COUNTS
        .iter()
        .flat_map(|num_gpus| (0..REPLICATES).map(move |_| record(delay, num_images, *num_gpus, len)))
        .collect()
}

pub fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

/// Directory below the system temp dir that is unique to one test.
pub fn test_dir(name: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("segbench-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
