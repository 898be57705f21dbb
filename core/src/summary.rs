//! Summary statistics over a results list

use std::cmp::Ordering;

use crate::result::BenchmarkResult;

/// Derived statistics for one run or cycle
#[derive(Debug, Clone, Default)]
pub struct Summary<'a> {
    /// Number of results
    pub total: usize,

    /// Successful results
    pub successful: Vec<&'a BenchmarkResult>,

    /// Failed results
    pub failed: Vec<&'a BenchmarkResult>,

    /// Mean tokens/sec over successful results
    pub average_tokens_per_second: Option<f64>,

    /// Successful result with the highest tokens/sec
    pub fastest: Option<&'a BenchmarkResult>,

    /// Successful result with the lowest tokens/sec
    pub slowest: Option<&'a BenchmarkResult>,
}

impl<'a> Summary<'a> {
    /// Compute the summary of `results`
    pub fn from_results(results: &'a [BenchmarkResult]) -> Self {
        let (successful, failed): (Vec<_>, Vec<_>) = results.iter().partition(|r| r.success);

        let average_tokens_per_second = if successful.is_empty() {
            None
        } else {
            let sum: f64 = successful.iter().map(|r| r.tokens_per_second).sum();
            Some(sum / successful.len() as f64)
        };

        let fastest = successful
            .iter()
            .copied()
            .max_by(|a, b| compare_throughput(a, b));
        let slowest = successful
            .iter()
            .copied()
            .min_by(|a, b| compare_throughput(a, b));

        Self {
            total: results.len(),
            successful,
            failed,
            average_tokens_per_second,
            fastest,
            slowest,
        }
    }

    /// Number of successful results
    pub fn successful_count(&self) -> usize {
        self.successful.len()
    }

    /// Number of failed results
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Success rate (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.successful.len() as f64 / self.total as f64
        } else {
            0.0
        }
    }
}

fn compare_throughput(a: &BenchmarkResult, b: &BenchmarkResult) -> Ordering {
    a.tokens_per_second.total_cmp(&b.tokens_per_second)
}

/// Sort results by tokens/sec, fastest first. Ties keep their input order.
pub fn sort_by_throughput(results: &mut [BenchmarkResult]) {
    results.sort_by(|a, b| compare_throughput(b, a));
}

/// Sorted copy of `results`, fastest first
pub fn sorted_by_throughput(results: &[BenchmarkResult]) -> Vec<BenchmarkResult> {
    let mut sorted = results.to_vec();
    sort_by_throughput(&mut sorted);
    sorted
}
