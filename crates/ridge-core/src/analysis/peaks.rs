//! Peak Detection
//!
//! Find peaks in a 1-D signal above a threshold derived from the signal's
//! own statistics: `mean + sigmas * standard_deviation`, computed once over
//! the whole input.
//!
//! A peak is a left trough, a crest, and a right trough. The scan keeps one
//! in-progress candidate and fills its slots as samples cross the threshold;
//! a candidate finalizes on the below-threshold sample that follows its
//! right trough, and its size is the trapezoidal area of the signal between
//! the troughs. A candidate still open at end of input is dropped.

use crate::analysis::statistics;
use crate::types::SamplePoint;

/// A detected peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Sample bounding the peak on the left, below threshold
    pub left_trough: SamplePoint,
    /// Highest sample between the troughs; ties favor the later sample
    pub crest: SamplePoint,
    /// Sample bounding the peak on the right, below threshold
    pub right_trough: SamplePoint,
    /// Trapezoidal area of the signal between the troughs
    pub area: f64,
}

/// In-progress candidate; slots fill as the scan recognizes them.
#[derive(Debug, Clone, Copy, Default)]
struct Candidate {
    left_trough: Option<SamplePoint>,
    crest: Option<SamplePoint>,
    right_trough: Option<SamplePoint>,
}

impl Candidate {
    /// True once a crest has been recorded strictly after the left trough.
    fn has_crest_after_left(&self) -> bool {
        match (self.crest, self.left_trough) {
            (Some(crest), Some(left)) => crest.index > left.index,
            _ => false,
        }
    }

    /// True when `value` should replace the current crest.
    fn crest_beaten_by(&self, value: f64) -> bool {
        self.crest.map_or(true, |crest| value >= crest.value)
    }
}

/// Peak detection configuration
pub struct PeakDetector {
    /// Threshold sensitivity in standard deviations above the mean
    sigmas: f64,
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self { sigmas: 1.0 }
    }
}

impl PeakDetector {
    /// Create a new peak detector with default sensitivity
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold sensitivity (typically 1.0 - 3.0)
    pub fn with_sigmas(mut self, sigmas: f64) -> Self {
        self.sigmas = sigmas;
        self
    }

    /// Detection threshold for the given values: `mean + sigmas * stddev`.
    ///
    /// `None` when the input has fewer than two samples, in which case the
    /// standard deviation is undefined and no peaks can be detected.
    fn threshold(&self, values: &[f64]) -> Option<f64> {
        let mean = statistics::average(values).ok()?;
        let stddev = statistics::standard_deviation(values, mean).ok()?;
        Some(mean + self.sigmas * stddev)
    }

    /// Find all peaks in a densely indexed signal.
    ///
    /// Samples at or above the threshold count as peak material (the
    /// comparison against the threshold is strict `<` for "below"). Output
    /// is in ascending index order. A degenerate signal (fewer than two
    /// samples) yields an empty list.
    pub fn find_peaks(&self, signal: &[f64]) -> Vec<Peak> {
        let threshold = match self.threshold(signal) {
            Some(t) => t,
            None => return Vec::new(),
        };

        let mut peaks = Vec::new();
        let mut current = Candidate::default();

        for (x, &y) in signal.iter().enumerate() {
            let sample = SamplePoint::new(x as u64, y);

            if y < threshold {
                // A candidate with its right trough set finalizes on the
                // next below-threshold sample, which is consumed here.
                if current.right_trough.is_some() {
                    peaks.push(finalize(&current, |l, r| dense_area(signal, l, r)));
                    current = Candidate::default();
                }
                // Still looking for a left trough.
                else if current.left_trough.is_none() {
                    current.left_trough = Some(sample);
                }
                // Left trough and crest are in place; take this as the
                // right trough, for now.
                else if current.has_crest_after_left() {
                    current.right_trough = Some(sample);
                }
                // Below threshold again with no crest in between: the
                // earlier left trough was a false start.
                else {
                    current.left_trough = Some(sample);
                }
            } else if current.left_trough.is_some() {
                if current.crest_beaten_by(y) {
                    current.crest = Some(sample);
                }
            } else if current.right_trough.is_some() {
                // Right trough without a left trough; not reachable under
                // in-order scanning, finalized anyway.
                peaks.push(finalize(&current, |l, r| dense_area(signal, l, r)));
                current = Candidate::default();
            } else {
                // First sample of a candidate is already above threshold;
                // seed the left-trough slot as a starting point.
                current.left_trough = Some(sample);
            }
        }

        // A candidate still in progress at end of input is dropped.
        peaks
    }

    /// Find peaks of at least `min_peak_area` in a sparse point sequence.
    ///
    /// Same state machine as [`find_peaks`](Self::find_peaks), generalized
    /// to points whose indices need not be contiguous. A finalized
    /// candidate is kept only when its area reaches `min_peak_area`; the
    /// candidate state resets either way.
    ///
    /// The area rule differs from the dense variant: integration runs from
    /// the left trough through the remainder of the sequence (excluding
    /// the final pair) rather than stopping at the right trough. The
    /// minimum-area filter is the only guard against over-wide regions.
    pub fn find_peaks_of_size(&self, points: &[SamplePoint], min_peak_area: f64) -> Vec<Peak> {
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let threshold = match self.threshold(&values) {
            Some(t) => t,
            None => return Vec::new(),
        };

        let mut peaks = Vec::new();
        let mut current = Candidate::default();

        for &point in points {
            let y = point.value;

            if y < threshold {
                if current.right_trough.is_some() {
                    let peak = finalize(&current, |l, r| sparse_area(points, l, r));
                    if peak.area >= min_peak_area {
                        peaks.push(peak);
                    }
                    current = Candidate::default();
                } else if current.left_trough.is_none() {
                    current.left_trough = Some(point);
                } else if current.has_crest_after_left() {
                    current.right_trough = Some(point);
                } else {
                    current.left_trough = Some(point);
                }
            } else if current.left_trough.is_some() {
                if current.crest_beaten_by(y) {
                    current.crest = Some(point);
                }
            } else if current.right_trough.is_some() {
                let peak = finalize(&current, |l, r| sparse_area(points, l, r));
                if peak.area >= min_peak_area {
                    peaks.push(peak);
                }
                current = Candidate::default();
            } else {
                current.left_trough = Some(point);
            }
        }

        peaks
    }

    /// Format peaks as text table
    pub fn format_text(peaks: &[Peak]) -> String {
        let mut output = String::new();
        output.push_str("Detected Peaks\n");
        output.push_str(&"═".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:>4}  {:>10}  {:>10}  {:>12}  {:>12}\n",
            "#", "Left", "Crest", "Right", "Area"
        ));
        output.push_str(&"─".repeat(64));
        output.push('\n');

        for (i, peak) in peaks.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}  {:>10}  {:>10}  {:>12}  {:>12.3}\n",
                i + 1,
                peak.left_trough.index,
                peak.crest.index,
                peak.right_trough.index,
                peak.area
            ));
        }

        if peaks.is_empty() {
            output.push_str("  No peaks found above threshold\n");
        }

        output
    }

    /// Format peaks as JSON
    pub fn format_json(peaks: &[Peak]) -> String {
        let peaks_json: Vec<String> = peaks
            .iter()
            .map(|p| {
                format!(
                    r#"    {{
      "left_trough_index": {},
      "left_trough_value": {:.6},
      "crest_index": {},
      "crest_value": {:.6},
      "right_trough_index": {},
      "right_trough_value": {:.6},
      "area": {:.6}
    }}"#,
                    p.left_trough.index,
                    p.left_trough.value,
                    p.crest.index,
                    p.crest.value,
                    p.right_trough.index,
                    p.right_trough.value,
                    p.area
                )
            })
            .collect();

        format!(
            r#"{{
  "num_peaks": {},
  "peaks": [
{}
  ]
}}"#,
            peaks.len(),
            peaks_json.join(",\n")
        )
    }

    /// Format peaks as CSV
    pub fn format_csv(peaks: &[Peak]) -> String {
        let mut output = String::from(
            "left_trough_index,left_trough_value,crest_index,crest_value,right_trough_index,right_trough_value,area\n",
        );
        for peak in peaks {
            output.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                peak.left_trough.index,
                peak.left_trough.value,
                peak.crest.index,
                peak.crest.value,
                peak.right_trough.index,
                peak.right_trough.value,
                peak.area
            ));
        }
        output
    }
}

/// Turn a candidate into an independent, finalized peak.
///
/// Unset slots fall back to the origin point so a malformed candidate
/// still produces a (zero-area) record.
fn finalize<F>(candidate: &Candidate, area: F) -> Peak
where
    F: Fn(SamplePoint, SamplePoint) -> f64,
{
    let left_trough = candidate.left_trough.unwrap_or_default();
    let crest = candidate.crest.unwrap_or_default();
    let right_trough = candidate.right_trough.unwrap_or_default();

    Peak {
        left_trough,
        crest,
        right_trough,
        area: area(left_trough, right_trough),
    }
}

/// Trapezoidal area of `signal` between the troughs, inclusive.
///
/// Sums `0.5 * (signal[i] + signal[i-1])` for `i` from one past the left
/// trough through the right trough. Zero when the troughs are not properly
/// ordered.
fn dense_area(signal: &[f64], left: SamplePoint, right: SamplePoint) -> f64 {
    let mut area = 0.0;

    if left.index < right.index {
        for i in (left.index + 1)..=right.index {
            let i = i as usize;
            area += 0.5 * (signal[i] + signal[i - 1]);
        }
    }

    area
}

/// Trapezoidal area for the sparse variant.
///
/// Locates the left trough in the sequence by structural equality and sums
/// consecutive-pair contributions from there through the remainder of the
/// sequence, excluding the final pair. Unlike [`dense_area`] this does not
/// stop at the right trough. Zero when the troughs are not properly
/// ordered or the left trough is not found.
fn sparse_area(points: &[SamplePoint], left: SamplePoint, right: SamplePoint) -> f64 {
    let mut area = 0.0;

    if left.index < right.index {
        if let Some(start) = points.iter().position(|p| *p == left) {
            let tail = &points[start..];
            if tail.len() >= 2 {
                for pair in tail.windows(2).take(tail.len() - 2) {
                    area += 0.5 * (pair[0].value + pair[1].value);
                }
            }
        }
    }

    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_points(values: &[f64]) -> Vec<SamplePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| SamplePoint::new(i as u64, v))
            .collect()
    }

    #[test]
    fn test_single_clean_bump() {
        let signal = [0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0];

        // Threshold comes out just under 1.0 for these values.
        let peaks = PeakDetector::new().with_sigmas(0.15).find_peaks(&signal);

        assert_eq!(peaks.len(), 1);
        let peak = &peaks[0];
        assert_eq!(peak.left_trough.index, 2);
        assert_eq!(peak.crest.index, 3);
        assert_eq!(peak.crest.value, 5.0);
        assert_eq!(peak.right_trough.index, 4);

        // 0.5*(5+0) + 0.5*(0+5)
        assert_eq!(peak.area, 5.0);
    }

    #[test]
    fn test_constant_signal_has_no_peaks() {
        let signal = [2.0; 8];
        let peaks = PeakDetector::new().find_peaks(&signal);
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_sample_at_threshold_counts_as_above() {
        // With sigmas = 0 the threshold is exactly the mean, 1.0 here, and
        // the sample at index 1 sits exactly on it. Treated as peak
        // material, it becomes the first crest and index 0 stays the left
        // trough; were the comparison non-strict it would instead overwrite
        // the left trough and shrink the area to 3.5.
        let signal = [0.0, 1.0, 3.0, 0.0, 0.0, 0.0, 0.0, 4.0];
        let peaks = PeakDetector::new().with_sigmas(0.0).find_peaks(&signal);

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].left_trough.index, 0);
        assert_eq!(peaks[0].crest.index, 2);
        assert_eq!(peaks[0].right_trough.index, 3);
        assert_eq!(peaks[0].area, 4.0);
    }

    #[test]
    fn test_excursion_at_last_sample_is_dropped() {
        // The only excursion has no right trough before input ends, so the
        // in-progress candidate is discarded.
        let signal = [0.0, 0.0, 0.0, 0.0, 10.0];
        let peaks = PeakDetector::new().find_peaks(&signal);
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_first_sample_above_threshold_seeds_left_trough() {
        let signal = [9.0, 0.0, 0.0, 9.0, 0.0, 0.0];
        let peaks = PeakDetector::new().find_peaks(&signal);

        // The leading excursion only seeds the candidate; the real peak is
        // the second excursion, bounded by genuine troughs.
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].left_trough.index, 2);
        assert_eq!(peaks[0].crest.index, 3);
        assert_eq!(peaks[0].right_trough.index, 4);
        assert_eq!(peaks[0].area, 9.0);
    }

    #[test]
    fn test_equal_crests_favor_later_sample() {
        let signal = [0.0, 0.0, 7.0, 7.0, 0.0, 0.0, 0.0];
        let peaks = PeakDetector::new().with_sigmas(0.5).find_peaks(&signal);

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].crest.index, 3);
    }

    #[test]
    fn test_empty_and_single_sample_signals() {
        let detector = PeakDetector::new();
        assert!(detector.find_peaks(&[]).is_empty());
        assert!(detector.find_peaks(&[5.0]).is_empty());
        assert!(detector.find_peaks_of_size(&[], 0.0).is_empty());
        assert!(detector
            .find_peaks_of_size(&[SamplePoint::new(0, 5.0)], 0.0)
            .is_empty());
    }

    #[test]
    fn test_two_separated_bumps() {
        let signal = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 20.0, 0.0, 0.0, 0.0];
        let peaks = PeakDetector::new().with_sigmas(0.5).find_peaks(&signal);

        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].crest.index, 3);
        assert_eq!(peaks[0].area, 10.0);
        assert_eq!(peaks[1].crest.index, 7);
        assert_eq!(peaks[1].area, 20.0);
    }

    #[test]
    fn test_sparse_min_area_filter() {
        let points = unit_points(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 20.0, 0.0, 0.0, 0.0]);
        let detector = PeakDetector::new().with_sigmas(0.5);

        let all = detector.find_peaks_of_size(&points, 0.0);
        assert_eq!(all.len(), 2);

        // The first bump's integration runs to the end of the sequence, so
        // its area (30) exceeds the second bump's (20).
        let large_only = detector.find_peaks_of_size(&points, 25.0);
        assert_eq!(large_only.len(), 1);
        assert_eq!(large_only[0].crest.index, 3);

        let none = detector.find_peaks_of_size(&points, 100.0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_sparse_noncontiguous_indices() {
        // Indices are timestamps, not offsets; the scan keys on them only
        // for ordering, and area integration treats neighbors as unit-
        // spaced.
        let values = [1.0, 1.0, 6.0, 1.0, 1.0];
        let points: Vec<SamplePoint> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| SamplePoint::new(1000 + 10 * i as u64, v))
            .collect();

        let peaks = PeakDetector::new().find_peaks_of_size(&points, 0.0);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].left_trough.index, 1010);
        assert_eq!(peaks[0].crest.index, 1020);
        assert_eq!(peaks[0].right_trough.index, 1030);
        assert_eq!(peaks[0].area, 7.0);
    }

    #[test]
    fn test_emitted_peaks_are_independent_copies() {
        let signal = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 20.0, 0.0, 0.0, 0.0];
        let peaks = PeakDetector::new().with_sigmas(0.5).find_peaks(&signal);

        assert_eq!(peaks.len(), 2);
        assert_ne!(peaks[0], peaks[1]);
        assert!(peaks[0].left_trough.index < peaks[0].crest.index);
        assert!(peaks[0].crest.index < peaks[0].right_trough.index);
    }

    #[test]
    fn test_format_text() {
        let signal = [0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0];
        let peaks = PeakDetector::new().with_sigmas(0.15).find_peaks(&signal);

        let text = PeakDetector::format_text(&peaks);
        assert!(text.contains("Detected Peaks"));
        assert!(text.contains("5.000"));

        let empty = PeakDetector::format_text(&[]);
        assert!(empty.contains("No peaks found above threshold"));
    }

    #[test]
    fn test_format_csv_header() {
        let csv = PeakDetector::format_csv(&[]);
        assert!(csv.starts_with("left_trough_index,"));
    }
}
