//! Bump Signal Generation
//!
//! Builds test signals with known peak content: evenly spaced half-sine
//! bumps over a flat baseline, plus additive white Gaussian noise from a
//! seeded RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use ridge_core::types::SamplePoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for bump signal generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BumpSignalConfig {
    /// Total number of samples
    pub samples: usize,
    /// Number of half-sine bumps, spread evenly across the signal
    pub bumps: usize,
    /// Height of each bump above the baseline
    pub bump_amplitude: f64,
    /// Width of each bump in samples
    pub bump_width: usize,
    /// Standard deviation of the additive Gaussian noise (0 disables it)
    pub noise_sigma: f64,
    /// Constant level the signal rests at between bumps
    pub baseline: f64,
    /// RNG seed; a fixed seed reproduces the exact signal
    pub seed: u64,
}

impl Default for BumpSignalConfig {
    fn default() -> Self {
        Self {
            samples: 512,
            bumps: 4,
            bump_amplitude: 10.0,
            bump_width: 16,
            noise_sigma: 0.5,
            baseline: 0.0,
            seed: 42,
        }
    }
}

/// Deterministic generator of bump signals
pub struct BumpSignalGenerator {
    config: BumpSignalConfig,
    rng: StdRng,
}

impl BumpSignalGenerator {
    /// Create a generator from the given configuration
    pub fn new(config: BumpSignalConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Get the configuration
    pub fn config(&self) -> &BumpSignalConfig {
        &self.config
    }

    /// Generate one signal: baseline, bumps, then noise.
    pub fn generate(&mut self) -> Vec<f64> {
        let cfg = &self.config;
        let mut signal = vec![cfg.baseline; cfg.samples];

        // Bump centers sit at the midpoints of equal slices of the signal,
        // keeping every bump clear of the first and last samples.
        if cfg.bumps > 0 && cfg.samples > 0 {
            let slice = cfg.samples / cfg.bumps;
            for b in 0..cfg.bumps {
                let center = b * slice + slice / 2;
                add_bump(&mut signal, center, cfg.bump_width, cfg.bump_amplitude);
            }
        }

        if cfg.noise_sigma > 0.0 {
            // Mirrors an AWGN channel: independent normal noise per sample.
            if let Ok(noise) = Normal::new(0.0, cfg.noise_sigma) {
                for sample in signal.iter_mut() {
                    *sample += noise.sample(&mut self.rng);
                }
            }
        }

        signal
    }

    /// Generate one signal as unit-indexed sample points.
    pub fn generate_points(&mut self) -> Vec<SamplePoint> {
        self.generate()
            .into_iter()
            .enumerate()
            .map(|(i, v)| SamplePoint::new(i as u64, v))
            .collect()
    }
}

/// Add a half-sine bump of the given width and amplitude, centered at
/// `center`, clipped to the signal bounds.
fn add_bump(signal: &mut [f64], center: usize, width: usize, amplitude: f64) {
    if width == 0 {
        return;
    }

    let start = center.saturating_sub(width / 2);
    for offset in 0..width {
        let i = start + offset;
        if i >= signal.len() {
            break;
        }
        let phase = PI * (offset as f64 + 0.5) / width as f64;
        signal[i] += amplitude * phase.sin();
    }
}
