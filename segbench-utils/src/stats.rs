//! Module computing summary statistics for grouped runtime samples.

use serde::Serialize;
use statrs::statistics::Statistics;

/// z-value of the two-sided 95% interval under the normal approximation.
pub const Z_95: f64 = 1.96;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("Group {group} has {len} samples, but at least 2 are required to estimate the variance.")]
    TooFewSamples { group: usize, len: usize },
    #[error("Group {group} contains the non-finite sample {value} at index {index}.")]
    NonFinite {
        group: usize,
        index: usize,
        value: f64,
    },
}

/// Mean, spread and 95% confidence interval of a group of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistic {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (`n - 1` divisor)
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_err: f64,
    /// Half-width of the symmetric 95% confidence interval, `Z_95 * std_err`
    pub half_width: f64,
    /// Number of samples
    pub n_samples: usize,
}

impl std::fmt::Display for SummaryStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean: {:.4} +- {:.4} (std dev: {:.4}, std err: {:.4}, n={})",
            self.mean, self.half_width, self.std_dev, self.std_err, self.n_samples
        )
    }
}

/// Summarize a single group of samples. `group` is only used for error reporting.
pub fn summarize(group: usize, samples: &[f64]) -> Result<SummaryStatistic, StatsError> {
    if samples.len() < 2 {
        return Err(StatsError::TooFewSamples {
            group,
            len: samples.len(),
        });
    }
    if let Some((index, value)) = samples.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(StatsError::NonFinite {
            group,
            index,
            value: *value,
        });
    }

    let n_samples = samples.len();
    let mean = samples.mean();
    let std_dev = samples.std_dev();
    let std_err = std_dev / (n_samples as f64).sqrt();

    Ok(SummaryStatistic {
        mean,
        std_dev,
        std_err,
        half_width: std_err * Z_95,
        n_samples,
    })
}

/// Summarize every group, keeping the input order.
pub fn summarize_groups<G>(groups: &[G]) -> Result<Vec<SummaryStatistic>, StatsError>
where
    G: AsRef<[f64]>,
{
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| summarize(i, group.as_ref()))
        .collect()
}

/// Returns the means and the 95% half-widths of all groups as two parallel vectors, ready to be
/// used as bar heights and error bars.
pub fn format_data_for_error_plotting<G>(groups: &[G]) -> Result<(Vec<f64>, Vec<f64>), StatsError>
where
    G: AsRef<[f64]>,
{
    let summaries = summarize_groups(groups)?;
    for (i, s) in summaries.iter().enumerate() {
        log::trace!("group {i}: {s}");
    }
    Ok(summaries
        .into_iter()
        .map(|s| (s.mean, s.half_width))
        .unzip())
}
