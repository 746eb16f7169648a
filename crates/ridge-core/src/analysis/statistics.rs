//! Signal Statistics
//!
//! Basic statistical primitives over a flat numeric sequence: mean, sample
//! variance, standard deviation, min/max, and elementwise normalization.
//! These feed the peak detector's threshold derivation and are exposed for
//! callers that want the numbers directly.

use crate::error::{AnalysisError, AnalysisResult};

/// Arithmetic mean of the given values.
///
/// Returns [`AnalysisError::EmptyInput`] for an empty slice.
pub fn average(values: &[f64]) -> AnalysisResult<f64> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput {
            operation: "average",
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Arithmetic mean of the given integer values.
///
/// The sum is accumulated in integer arithmetic before the final division.
/// Returns [`AnalysisError::EmptyInput`] for an empty slice.
pub fn average_i64(values: &[i64]) -> AnalysisResult<f64> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput {
            operation: "average_i64",
        });
    }
    let sum: i64 = values.iter().sum();
    Ok(sum as f64 / values.len() as f64)
}

/// Sample variance of the given values around `mean`.
///
/// Uses the unbiased `n - 1` denominator, so at least two samples are
/// required; shorter input returns [`AnalysisError::InsufficientData`].
pub fn variance(values: &[f64], mean: f64) -> AnalysisResult<f64> {
    if values.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            operation: "variance",
            needed: 2,
            got: values.len(),
        });
    }
    let numerator: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Ok(numerator / (values.len() - 1) as f64)
}

/// Sample standard deviation of the given values around `mean`.
///
/// Square root of [`variance`]; propagates its error for short input.
pub fn standard_deviation(values: &[f64], mean: f64) -> AnalysisResult<f64> {
    Ok(variance(values, mean)?.sqrt())
}

/// Smallest of the given values, or `0.0` for an empty slice.
///
/// The empty-input sentinel is indistinguishable from an all-zero signal;
/// callers that care must check the length themselves.
pub fn min(values: &[f64]) -> f64 {
    match values.split_first() {
        Some((&first, rest)) => rest.iter().fold(first, |m, &v| v.min(m)),
        None => 0.0,
    }
}

/// Largest of the given values, or `0.0` for an empty slice.
///
/// Same empty-input sentinel caveat as [`min`].
pub fn max(values: &[f64]) -> f64 {
    match values.split_first() {
        Some((&first, rest)) => rest.iter().fold(first, |m, &v| v.max(m)),
        None => 0.0,
    }
}

/// Elementwise `(v - mean) / variance` over the given values.
///
/// Note the divisor: this z-score-like transform divides by the variance,
/// not the standard deviation. Callers that want unit-variance scores must
/// pass the standard deviation as `variance`.
pub fn normalize(values: &[f64], mean: f64, variance: f64) -> Vec<f64> {
    values.iter().map(|v| (v - mean) / variance).collect()
}

/// One-shot statistics bundle for a signal
#[derive(Debug, Clone)]
pub struct SignalSummary {
    /// Number of samples analyzed
    pub num_samples: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample variance (n - 1 denominator)
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
}

impl SignalSummary {
    /// Compute the summary for the given samples.
    ///
    /// Requires at least two samples for the variance denominator.
    pub fn compute(values: &[f64]) -> AnalysisResult<Self> {
        let mean = average(values)?;
        let variance = variance(values, mean)?;

        Ok(Self {
            num_samples: values.len(),
            mean,
            variance,
            std_dev: variance.sqrt(),
            min: min(values),
            max: max(values),
        })
    }

    /// Format as text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str("Signal Summary\n");
        output.push_str(&"─".repeat(40));
        output.push('\n');
        output.push_str(&format!("Samples:     {}\n", self.num_samples));
        output.push_str(&format!("Mean:        {:.6}\n", self.mean));
        output.push_str(&format!("Variance:    {:.6}\n", self.variance));
        output.push_str(&format!("Std Dev:     {:.6}\n", self.std_dev));
        output.push_str(&format!("Min:         {:.6}\n", self.min));
        output.push_str(&format!("Max:         {:.6}\n", self.max));
        output
    }

    /// Format as JSON
    pub fn to_json(&self) -> String {
        format!(
            r#"{{
  "num_samples": {},
  "mean": {:.6},
  "variance": {:.6},
  "std_dev": {:.6},
  "min": {:.6},
  "max": {:.6}
}}"#,
            self.num_samples, self.mean, self.variance, self.std_dev, self.min, self.max
        )
    }
}
