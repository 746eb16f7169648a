//! Signal Analysis Module
//!
//! This module provides the analysis tools for 1-D numeric signals:
//! statistics computation and threshold-based peak detection.
//!
//! ## Features
//!
//! - **Statistics**: mean, sample variance, standard deviation, min/max,
//!   normalization, and a one-shot [`SignalSummary`]
//! - **Peak Detection**: single-pass trough/crest/trough scan with
//!   trapezoidal area integration, for dense arrays and sparse point
//!   sequences
//!
//! ## Example
//!
//! ```rust
//! use ridge_core::analysis::{PeakDetector, SignalSummary};
//!
//! let signal = vec![0.0, 1.0, 0.0, 6.0, 0.0, 1.0, 0.0, 0.0];
//!
//! let summary = SignalSummary::compute(&signal).unwrap();
//! println!("mean {:.3}, stddev {:.3}", summary.mean, summary.std_dev);
//!
//! let peaks = PeakDetector::new().with_sigmas(1.0).find_peaks(&signal);
//! for peak in &peaks {
//!     println!("crest at {} area {:.2}", peak.crest.index, peak.area);
//! }
//! ```

pub mod peaks;
pub mod statistics;

pub use peaks::{Peak, PeakDetector};
pub use statistics::SignalSummary;
