//! Descriptive statistics over generated samples.
//!
//! - **Mean**: Kahan compensated summation.
//! - **Variance**: Welford's online algorithm with Bessel's correction.
//! - **Histogram**: density-normalised bin counts, either equal-width bins
//!   over the data range or unit-width integer bins for discrete data.

use serde::Serialize;

/// Arithmetic mean using Kahan compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (denominator `n − 1`) using Welford's algorithm.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut running_mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in data.iter().enumerate() {
        let delta = x - running_mean;
        running_mean += delta / (i + 1) as f64;
        m2 += delta * (x - running_mean);
    }
    Some(m2 / (data.len() - 1) as f64)
}

fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &x in data {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Count, mean, variance and range of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// `0.0` for a single observation.
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarises `data`, or `None` if it is empty or not finite.
    pub fn of(data: &[f64]) -> Option<Self> {
        let mean = mean(data)?;
        let variance = variance(data).unwrap_or(0.0);
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count: data.len(),
            mean,
            variance,
            min,
            max,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// A density histogram: `density[i]` integrates to 1 over all bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, `density.len() + 1` of them, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub density: Vec<f64>,
}

impl Histogram {
    /// Equal-width bins spanning `[min, max]` of the data. The last bin is
    /// closed on the right.
    ///
    /// Returns `None` if `bins == 0`, `data` is empty or not finite, or a
    /// single bin would be wider than `f64::MAX`.
    pub fn with_bins(data: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let summary = Summary::of(data)?;
        let (lo, mut hi) = (summary.min, summary.max);
        if hi <= lo {
            hi = lo + 1.0;
        }
        // Divide before subtracting so ranges near ±f64::MAX don't overflow.
        let n = bins as f64;
        let width = hi / n - lo / n;
        if !(width.is_finite() && width > 0.0) {
            return None;
        }
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let t = i as f64 / n;
                lo * (1.0 - t) + hi * t
            })
            .collect();

        let mut counts = vec![0usize; bins];
        for &x in data {
            let idx = ((x / width - lo / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Self::from_counts(edges, counts, data.len()))
    }

    /// Unit-width bins centred on `0, 1, …, max(data)`.
    ///
    /// Returns `None` if `data` is empty.
    pub fn integer(data: &[u64]) -> Option<Self> {
        let max = *data.iter().max()?;
        let bins = max as usize + 1;
        let edges: Vec<f64> = (0..=bins).map(|i| i as f64 - 0.5).collect();
        let mut counts = vec![0usize; bins];
        for &x in data {
            counts[x as usize] += 1;
        }
        Some(Self::from_counts(edges, counts, data.len()))
    }

    fn from_counts(edges: Vec<f64>, counts: Vec<usize>, total: usize) -> Self {
        let density = counts
            .iter()
            .zip(edges.windows(2))
            .map(|(&c, w)| c as f64 / (total as f64 * (w[1] - w[0])))
            .collect();
        Self {
            edges,
            counts,
            density,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
