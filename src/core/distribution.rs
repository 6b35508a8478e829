use serde::Serialize;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Reference distribution used to express values in sigma units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NormalDistribution {
    pub mean: f64,
    pub sigma: f64,
}

impl NormalDistribution {
    #[must_use]
    pub fn new(mean: f64, sigma: f64) -> Self {
        Self { mean, sigma }
    }

    /// Mean and population standard deviation of a sample
    #[must_use]
    pub fn from_values(values: &[i32]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = count_to_f64(values.len());
        let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;
        Self::new(mean, variance.sqrt())
    }

    /// Distance from the mean in standard deviations
    #[must_use]
    pub fn to_sigma(&self, value: f64) -> f64 {
        if self.sigma > 0.0 {
            (value - self.mean) / self.sigma
        } else {
            0.0
        }
    }

    /// Sigma units scaled by ten and rounded, as plotted in SD tracks
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_sigma10x(&self, value: i32) -> i32 {
        (self.to_sigma(f64::from(value)) * 10.0).round() as i32
    }
}
