//! Detector configuration and validation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The closed set of statistical tests the detector can run.
///
/// Serialized names are lowercase (`"cdf"`, `"highrank"`, ...), matching
/// the canonical method names accepted by [`Method::from_str`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Two-tailed extremity of the active mean in the reference ECDF.
    Cdf,
    /// Bootstrap KS over first-order differences; targets volatility shifts.
    Diff,
    /// Permutation rank-sum test against the high tail.
    HighRank,
    /// Permutation rank-sum test against the low tail.
    LowRank,
    /// Bound exceedance against the configured upper/lower limits.
    Fence,
    /// Relative level change between active and reference means.
    Magnitude,
    /// Bootstrap two-sample Kolmogorov-Smirnov test on raw values.
    Ks,
}

impl Method {
    /// Every recognized method, in canonical order.
    pub const ALL: [Method; 7] = [
        Method::Cdf,
        Method::Diff,
        Method::HighRank,
        Method::LowRank,
        Method::Fence,
        Method::Magnitude,
        Method::Ks,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Method::Cdf => "cdf",
            Method::Diff => "diff",
            Method::HighRank => "highrank",
            Method::LowRank => "lowrank",
            Method::Fence => "fence",
            Method::Magnitude => "magnitude",
            Method::Ks => "ks",
        }
    }

}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ConfigError::UnknownMethod(s.to_string()))
    }
}

/// Configuration for the anomaly detector.
///
/// Immutable once validated: [`crate::Detector::new`] calls
/// [`DetectorConfig::validate`] and rejects anything out of contract, so a
/// constructed detector never re-checks these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Size of the active window (newest observations under test).
    pub active_size: usize,

    /// Reference window size in active-window-sized blocks:
    /// reference capacity = `active_size * n_seasons`.
    #[serde(default = "default_n_seasons")]
    pub n_seasons: usize,

    /// Upper fence bound. `None` means unbounded above.
    #[serde(default)]
    pub upper_bound: Option<f64>,

    /// Lower fence bound. `None` means unbounded below.
    #[serde(default)]
    pub lower_bound: Option<f64>,

    /// Minimum relative change before the magnitude method reports a
    /// nonzero probability. Must lie in (0, 1].
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,

    /// Permutation-resampling iterations for diff/highrank/lowrank/ks.
    #[serde(default = "default_perm_count")]
    pub perm_count: usize,

    /// Ordered set of methods to run. Must be non-empty and duplicate-free.
    pub methods: Vec<Method>,

    /// Per-method aggregation weights. Methods without an entry weigh 1.
    #[serde(default)]
    pub weights: BTreeMap<Method, f64>,

    /// Seed for the permutation RNG. Two detectors with the same seed,
    /// configuration, and observations produce bit-identical probabilities.
    #[serde(default)]
    pub seed: u64,
}

fn default_n_seasons() -> usize {
    4
}

fn default_sensitivity() -> f64 {
    0.1
}

fn default_perm_count() -> usize {
    500
}

impl DetectorConfig {
    /// Configuration with the given active size and methods; every other
    /// field takes its documented default.
    pub fn new(active_size: usize, methods: Vec<Method>) -> Self {
        Self {
            active_size,
            n_seasons: default_n_seasons(),
            upper_bound: None,
            lower_bound: None,
            sensitivity: default_sensitivity(),
            perm_count: default_perm_count(),
            methods,
            weights: BTreeMap::new(),
            seed: 0,
        }
    }

    /// Maximum number of observations the window holds.
    pub fn capacity(&self) -> usize {
        self.active_size * (self.n_seasons + 1)
    }

    /// Validate every configuration rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.active_size == 0 {
            return Err(ConfigError::InvalidActiveSize);
        }
        if self.n_seasons == 0 {
            return Err(ConfigError::InvalidSeasonCount);
        }
        if !(self.sensitivity > 0.0 && self.sensitivity <= 1.0) {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        if self.perm_count == 0 {
            return Err(ConfigError::InvalidPermCount);
        }
        if self.methods.is_empty() {
            return Err(ConfigError::NoMethods);
        }
        let mut seen = BTreeSet::new();
        for &method in &self.methods {
            if !seen.insert(method) {
                return Err(ConfigError::DuplicateMethod(method));
            }
        }
        self.validate_bounds()?;
        if self.methods.contains(&Method::Fence)
            && self.upper_bound.is_none()
            && self.lower_bound.is_none()
        {
            return Err(ConfigError::FenceWithoutBounds);
        }
        for (&method, &weight) in &self.weights {
            if !seen.contains(&method) {
                return Err(ConfigError::WeightForUnselectedMethod(method));
            }
            if !(weight.is_finite() && weight > 0.0) {
                return Err(ConfigError::InvalidWeight { method, weight });
            }
        }
        Ok(())
    }

    fn validate_bounds(&self) -> Result<(), ConfigError> {
        if let Some(upper) = self.upper_bound {
            if !upper.is_finite() {
                return Err(ConfigError::NonFiniteBound {
                    side: "upper",
                    value: upper,
                });
            }
        }
        if let Some(lower) = self.lower_bound {
            if !lower.is_finite() {
                return Err(ConfigError::NonFiniteBound {
                    side: "lower",
                    value: lower,
                });
            }
        }
        if let (Some(upper), Some(lower)) = (self.upper_bound, self.lower_bound) {
            if upper < lower {
                return Err(ConfigError::BoundsInverted { upper, lower });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DetectorConfig::new(2, vec![Method::Cdf, Method::Ks]);
        assert!(config.validate().is_ok());
        assert_eq!(config.n_seasons, 4);
        assert_eq!(config.sensitivity, 0.1);
        assert_eq!(config.perm_count, 500);
        assert_eq!(config.capacity(), 10);
    }

    #[test]
    fn rejects_zero_sizes() {
        let config = DetectorConfig::new(0, vec![Method::Cdf]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidActiveSize)
        ));

        let mut config = DetectorConfig::new(1, vec![Method::Cdf]);
        config.n_seasons = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeasonCount)
        ));

        let mut config = DetectorConfig::new(1, vec![Method::Cdf]);
        config.perm_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPermCount)
        ));
    }

    #[test]
    fn rejects_bad_sensitivity() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let mut config = DetectorConfig::new(1, vec![Method::Cdf]);
            config.sensitivity = bad;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSensitivity(_))
            ));
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_methods() {
        let config = DetectorConfig::new(1, vec![]);
        assert!(matches!(config.validate(), Err(ConfigError::NoMethods)));

        let config = DetectorConfig::new(1, vec![Method::Cdf, Method::Cdf]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateMethod(Method::Cdf))
        ));
    }

    #[test]
    fn fence_requires_a_bound() {
        let config = DetectorConfig::new(1, vec![Method::Fence]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FenceWithoutBounds)
        ));

        let mut config = DetectorConfig::new(1, vec![Method::Fence]);
        config.upper_bound = Some(5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_and_non_finite_bounds() {
        let mut config = DetectorConfig::new(1, vec![Method::Fence]);
        config.upper_bound = Some(1.0);
        config.lower_bound = Some(2.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoundsInverted { .. })
        ));

        let mut config = DetectorConfig::new(1, vec![Method::Fence]);
        config.upper_bound = Some(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteBound { side: "upper", .. })
        ));
    }

    #[test]
    fn rejects_bad_weights() {
        let mut config = DetectorConfig::new(1, vec![Method::Cdf]);
        config.weights.insert(Method::Ks, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightForUnselectedMethod(Method::Ks))
        ));

        let mut config = DetectorConfig::new(1, vec![Method::Cdf]);
        config.weights.insert(Method::Cdf, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn method_names_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.name().parse::<Method>().unwrap(), method);
        }
        assert!("zscore".parse::<Method>().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: DetectorConfig = serde_json::from_str(
            r#"{"active_size": 2, "methods": ["cdf", "highrank", "fence"], "upper_bound": 5.0}"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_seasons, 4);
        assert_eq!(config.perm_count, 500);
        assert_eq!(
            config.methods,
            vec![Method::Cdf, Method::HighRank, Method::Fence]
        );
        assert_eq!(config.upper_bound, Some(5.0));
        assert_eq!(config.lower_bound, None);
    }

    #[test]
    fn unknown_method_name_is_rejected_at_parse_time() {
        let result = serde_json::from_str::<DetectorConfig>(
            r#"{"active_size": 2, "methods": ["cdf", "bogus"]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn weights_serialize_by_method_name() {
        let mut config = DetectorConfig::new(1, vec![Method::Cdf, Method::Ks]);
        config.weights.insert(Method::Ks, 2.0);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""ks":2.0"#));

        let back: DetectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.weights.get(&Method::Ks), Some(&2.0));
    }
}
