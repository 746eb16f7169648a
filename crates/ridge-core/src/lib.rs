//! # Ridge Signal Analysis Core
//!
//! Peak detection and basic statistics for one-dimensional numeric signals
//! (an accelerometer axis sampled over time, a load trace, a sensor sweep).
//!
//! A peak is a localized excursion above a threshold derived from the
//! signal's own statistics:
//!
//! ```text
//! raw samples ──▶ statistics (mean, stddev) ──▶ threshold
//!                                                   │
//!                       single forward scan ◀───────┘
//!                               │
//!                               ▼
//!          [Peak { left trough, crest, right trough, area }]
//! ```
//!
//! The detector makes one pass over the signal, tracking a trough/crest/
//! trough candidate, and reports the trapezoidal area under each finished
//! peak. Two entry points cover densely indexed arrays and sparse,
//! arbitrarily indexed point sequences.
//!
//! ## Usage
//!
//! ```rust
//! use ridge_core::PeakDetector;
//!
//! let signal = vec![0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0];
//! let detector = PeakDetector::new().with_sigmas(0.15);
//! let peaks = detector.find_peaks(&signal);
//!
//! assert_eq!(peaks.len(), 1);
//! assert_eq!(peaks[0].crest.index, 3);
//! assert_eq!(peaks[0].area, 5.0);
//! ```

pub mod analysis;
pub mod error;
pub mod types;

// Re-exports
pub use analysis::peaks::{Peak, PeakDetector};
pub use analysis::statistics::SignalSummary;
pub use error::{AnalysisError, AnalysisResult};
pub use types::SamplePoint;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analysis::peaks::{Peak, PeakDetector};
    pub use crate::analysis::statistics::SignalSummary;
    pub use crate::types::SamplePoint;
}
