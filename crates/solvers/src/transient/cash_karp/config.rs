use thiserror::Error;

/// How the driver advances between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Adapt the step size from the embedded error estimate.
    #[default]
    Adaptive,

    /// Use the initial step size for every step and ignore the error estimate.
    Fixed,
}

/// Configuration for the Cash-Karp solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_attempts: usize,
    safety: f64,
    min_shrink: f64,
    max_growth: Option<f64>,
    mode: Mode,
}

/// Errors that can occur when building a Cash-Karp solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_attempts must be at least 1")]
    MaxAttempts,

    #[error("safety must be in (0, 1]")]
    Safety,

    #[error("min_shrink must be in (0, 1)")]
    MinShrink,

    #[error("max_growth must be finite and greater than 1")]
    MaxGrowth,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(20, 0.9, 0.1).unwrap()
    }
}

impl Config {
    /// Creates a new adaptive config with no growth ceiling.
    ///
    /// - `max_attempts` bounds the trial steps spent on one accepted step.
    /// - `safety` scales every proposed step size.
    /// - `min_shrink` is the smallest factor a rejected step may shrink by.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is outside its valid range.
    pub fn new(max_attempts: usize, safety: f64, min_shrink: f64) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::MaxAttempts);
        }
        if !(safety > 0.0 && safety <= 1.0) {
            return Err(ConfigError::Safety);
        }
        if !(min_shrink > 0.0 && min_shrink < 1.0) {
            return Err(ConfigError::MinShrink);
        }

        Ok(Self {
            max_attempts,
            safety,
            min_shrink,
            max_growth: None,
            mode: Mode::Adaptive,
        })
    }

    /// Caps the factor by which an accepted step may grow the next one.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_growth` is not finite or not greater than 1.
    pub fn with_max_growth(self, max_growth: f64) -> Result<Self, ConfigError> {
        if !(max_growth.is_finite() && max_growth > 1.0) {
            return Err(ConfigError::MaxGrowth);
        }

        Ok(Self {
            max_growth: Some(max_growth),
            ..self
        })
    }

    /// Returns a copy of this config using the given mode.
    #[must_use]
    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    /// Returns the maximum number of trial steps per accepted step.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the safety factor applied to proposed step sizes.
    #[must_use]
    pub fn safety(&self) -> f64 {
        self.safety
    }

    /// Returns the smallest shrink factor for a rejected step.
    #[must_use]
    pub fn min_shrink(&self) -> f64 {
        self.min_shrink
    }

    /// Returns the growth ceiling, if one is set.
    #[must_use]
    pub fn max_growth(&self) -> Option<f64> {
        self.max_growth
    }

    /// Returns the stepping mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_policy() {
        let config = Config::default();

        assert_eq!(config.max_attempts(), 20);
        assert_eq!(config.safety(), 0.9);
        assert_eq!(config.min_shrink(), 0.1);
        assert_eq!(config.max_growth(), None);
        assert_eq!(config.mode(), Mode::Adaptive);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(Config::new(0, 0.9, 0.1), Err(ConfigError::MaxAttempts));
        assert_eq!(Config::new(20, 0.0, 0.1), Err(ConfigError::Safety));
        assert_eq!(Config::new(20, f64::NAN, 0.1), Err(ConfigError::Safety));
        assert_eq!(Config::new(20, 0.9, 1.0), Err(ConfigError::MinShrink));
        assert_eq!(Config::new(20, 0.9, -0.5), Err(ConfigError::MinShrink));
    }

    #[test]
    fn growth_ceiling_is_validated() {
        let config = Config::default();

        assert_eq!(config.with_max_growth(1.0), Err(ConfigError::MaxGrowth));
        assert_eq!(
            config.with_max_growth(f64::INFINITY),
            Err(ConfigError::MaxGrowth)
        );
        assert_eq!(config.with_max_growth(5.0).unwrap().max_growth(), Some(5.0));
    }

    #[test]
    fn mode_can_be_switched() {
        let config = Config::default().with_mode(Mode::Fixed);

        assert_eq!(config.mode(), Mode::Fixed);
        assert_eq!(config.max_attempts(), 20);
    }
}
