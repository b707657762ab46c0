//! The stateful evaluator: one validated configuration, one window.
//!
//! A [`Detector`] consumes a univariate stream in arrival order and
//! reports, after each observation, the probability that the active
//! window is anomalous relative to the reference window. There is no
//! wall-clock anywhere: only arrival order matters.
//!
//! # Example
//!
//! ```
//! use dw_core::{Detector, DetectorConfig, Method};
//!
//! let config = DetectorConfig::new(1, vec![Method::Cdf, Method::Magnitude]);
//! let history = [0.1, 2.05, 1.5, 2.5, 2.6, 2.55];
//! let mut detector = Detector::new(config, &history).unwrap();
//!
//! let probability = detector.push(8.0);
//! assert!(probability > 0.5);
//! ```
//!
//! # Concurrency
//!
//! The borrow checker encodes the contract: [`Detector::eval`] takes
//! `&self` and may run concurrently from many threads; [`Detector::push`]
//! takes `&mut self` and therefore requires external serialization. The
//! detector owns plain data only, so it is `Send`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::aggregate::{resolve_weights, weighted_mean};
use crate::config::{DetectorConfig, Method};
use crate::error::DetectorError;
use crate::methods::{score, Segments};
use crate::window::Window;

// Stride for per-method seed derivation: each method gets its own RNG
// stream, independent of the order methods are configured in.
const METHOD_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    weights: Vec<(Method, f64)>,
    window: Window,
}

impl Detector {
    /// Build a detector from a configuration and initial history (oldest
    /// first; may be empty to start cold).
    ///
    /// All validation happens here: configuration rules per
    /// [`DetectorConfig::validate`], plus rejection of non-finite history
    /// values. A constructed detector never fails to evaluate.
    pub fn new(config: DetectorConfig, history: &[f64]) -> Result<Self, DetectorError> {
        config.validate()?;
        for (index, &value) in history.iter().enumerate() {
            if !value.is_finite() {
                return Err(DetectorError::NonFiniteHistory { index, value });
            }
        }
        let weights = resolve_weights(&config.methods, &config.weights);
        let window = Window::with_history(config.active_size, config.n_seasons, history);
        Ok(Self {
            config,
            weights,
            window,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Number of observations currently held.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Maximum number of observations the window holds.
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// True once the window is full and every method sees full-size
    /// segments; false during the warming phase, where methods degrade
    /// conservatively on short segments.
    pub fn is_warmed_up(&self) -> bool {
        self.window.is_full()
    }

    /// Drop all observations and return to the cold state.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Score the current window without mutating it.
    ///
    /// Repeated calls return bit-identical results: the permutation
    /// methods re-derive their RNGs from the configured seed on every
    /// evaluation.
    pub fn eval(&self) -> f64 {
        let reference = self.window.reference();
        let active = self.window.active();
        let segments = Segments {
            reference: &reference,
            active: &active,
        };
        let mut scored = Vec::with_capacity(self.weights.len());
        for &(method, weight) in &self.weights {
            let mut rng = self.method_rng(method);
            let probability = score(method, segments, &self.config, &mut rng);
            debug!(method = %method, probability, "method scored");
            scored.push((weight, probability));
        }
        weighted_mean(&scored)
    }

    /// Append an observation (evicting the oldest at capacity) and score
    /// the updated window.
    ///
    /// Non-finite values are skipped rather than ingested: the window is
    /// left unchanged and the current probability is returned, so the
    /// stream keeps flowing without poisoning the baseline.
    pub fn push(&mut self, value: f64) -> f64 {
        if !value.is_finite() {
            warn!(value, "skipping non-finite observation");
            return self.eval();
        }
        self.window.push(value);
        self.eval()
    }

    fn method_rng(&self, method: Method) -> StdRng {
        let offset = (method as u64 + 1).wrapping_mul(METHOD_SEED_STRIDE);
        StdRng::seed_from_u64(self.config.seed ^ offset)
    }
}
