//! Ready-made error norms.
//!
//! Each norm is a small value object carrying its own tolerances, so the
//! policy travels with the call instead of living in captured globals.
//! Per-coordinate error ratios are reduced to one scalar with [`Combine`].
//!
//! | Norm | Ratio for coordinate `i` |
//! |------|--------------------------|
//! | [`Relative`] | `abs(err_i / y_i) / tol` |
//! | [`Mixed`] | `err_i / (abs + rel * abs(y_i))` |
//! | [`WholeRun`] | `err_i / ((abs + rel * abs(f_i)) * dt / span)` |
//! | [`Weighted`] | `err_i / (abs_i + rel_i * abs(y_i))` |
//!
//! Here `y` is the candidate state, `err` the error estimate and `f` the
//! derivative at the start of the step.

use cashkarp_core::{ErrorNorm, OdeState};
use thiserror::Error;

/// Errors that can occur when building a tolerance or norm.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceError {
    #[error("relative tolerance must be finite and non-negative")]
    Relative,

    #[error("absolute tolerance must be finite and non-negative")]
    Absolute,

    #[error("relative and absolute tolerances cannot both be zero")]
    Zero,

    #[error("span must be finite and positive")]
    Span,
}

/// A relative/absolute tolerance pair.
///
/// The allowed error for a value `x` is `abs + rel * |x|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    rel: f64,
    abs: f64,
}

impl Tolerance {
    /// Creates a tolerance from relative and absolute parts.
    ///
    /// # Errors
    ///
    /// Returns an error if either part is negative or non-finite, or if both
    /// are zero.
    pub fn new(rel: f64, abs: f64) -> Result<Self, ToleranceError> {
        if !rel.is_finite() || rel < 0.0 {
            return Err(ToleranceError::Relative);
        }
        if !abs.is_finite() || abs < 0.0 {
            return Err(ToleranceError::Absolute);
        }
        if rel == 0.0 && abs == 0.0 {
            return Err(ToleranceError::Zero);
        }
        Ok(Self { rel, abs })
    }

    /// Creates an absolute-only tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `abs` is not finite and positive.
    pub fn absolute(abs: f64) -> Result<Self, ToleranceError> {
        Self::new(0.0, abs)
    }

    /// Returns the relative part.
    #[must_use]
    pub fn rel(&self) -> f64 {
        self.rel
    }

    /// Returns the absolute part.
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.abs
    }

    /// Returns the allowed error for a value of the given magnitude.
    #[must_use]
    pub fn allowed(&self, value: f64) -> f64 {
        self.abs + self.rel * value.abs()
    }
}

/// How per-coordinate error ratios are reduced to one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// Root of the sum of squares, treating coordinates as independent.
    #[default]
    Quadrature,

    /// Largest absolute ratio.
    Max,
}

impl Combine {
    /// Reduces ratios to a single normalized error.
    ///
    /// A `NaN` ratio always yields `NaN`.
    pub fn reduce(self, ratios: impl Iterator<Item = f64>) -> f64 {
        match self {
            Self::Quadrature => ratios.map(|r| r * r).sum::<f64>().sqrt(),
            Self::Max => ratios.fold(0.0, |max, r| {
                let r = r.abs();
                if r > max || r.is_nan() { r } else { max }
            }),
        }
    }
}

/// Pure relative error against the candidate state.
///
/// Suitable for solutions that never cross zero. A zero coordinate gives an
/// infinite ratio, or `NaN` when its error is also zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relative {
    tol: f64,
    combine: Combine,
}

impl Relative {
    /// Creates a relative norm with tolerance `tol` ("one part in `1/tol`").
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive.
    pub fn new(tol: f64) -> Result<Self, ToleranceError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ToleranceError::Relative);
        }
        Ok(Self {
            tol,
            combine: Combine::default(),
        })
    }

    /// Returns a copy using the given reduction.
    #[must_use]
    pub fn with_combine(self, combine: Combine) -> Self {
        Self { combine, ..self }
    }
}

impl<S: OdeState> ErrorNorm<S> for Relative {
    fn normalized_error(&self, candidate: &S, error_estimate: &S, _: &S, _: f64) -> f64 {
        let ratios = error_estimate
            .components()
            .zip(candidate.components())
            .map(|(err, y)| (err / y).abs() / self.tol);
        self.combine.reduce(ratios)
    }
}

/// Mixed relative/absolute error against the candidate state, applied per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixed {
    tolerance: Tolerance,
    combine: Combine,
}

impl Mixed {
    /// Creates a mixed norm.
    #[must_use]
    pub fn new(tolerance: Tolerance, combine: Combine) -> Self {
        Self { tolerance, combine }
    }
}

impl<S: OdeState> ErrorNorm<S> for Mixed {
    fn normalized_error(&self, candidate: &S, error_estimate: &S, _: &S, _: f64) -> f64 {
        let ratios = error_estimate
            .components()
            .zip(candidate.components())
            .map(|(err, y)| err / self.tolerance.allowed(y));
        self.combine.reduce(ratios)
    }
}

/// Error budget spread over a whole run.
///
/// Each step may spend the fraction `dt / span` of a tolerance on the
/// increment `f * dt`, so the accumulated local errors over `span` stay within
/// the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WholeRun {
    tolerance: Tolerance,
    span: f64,
    combine: Combine,
}

impl WholeRun {
    /// Creates a whole-run norm for a run of length `span`.
    ///
    /// # Errors
    ///
    /// Returns an error if `span` is not finite and positive.
    pub fn new(tolerance: Tolerance, span: f64, combine: Combine) -> Result<Self, ToleranceError> {
        if !span.is_finite() || span <= 0.0 {
            return Err(ToleranceError::Span);
        }
        Ok(Self {
            tolerance,
            span,
            combine,
        })
    }
}

impl<S: OdeState> ErrorNorm<S> for WholeRun {
    fn normalized_error(
        &self,
        _: &S,
        error_estimate: &S,
        initial_derivative: &S,
        dt: f64,
    ) -> f64 {
        let fraction = dt / self.span;
        let ratios = error_estimate
            .components()
            .zip(initial_derivative.components())
            .map(|(err, f)| err / (self.tolerance.allowed(f) * fraction));
        self.combine.reduce(ratios)
    }
}

/// Per-coordinate tolerances against the candidate state.
///
/// Useful when coordinates have different scales or meanings, such as an
/// angle that should be held to an absolute tolerance while radii use a
/// relative one.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighted {
    tolerances: Vec<Tolerance>,
    combine: Combine,
}

impl Weighted {
    /// Creates a weighted norm with one tolerance per coordinate.
    ///
    /// A state whose dimension differs from `tolerances.len()` yields `NaN`,
    /// which solvers report as an invalid error norm.
    #[must_use]
    pub fn new(tolerances: Vec<Tolerance>, combine: Combine) -> Self {
        Self {
            tolerances,
            combine,
        }
    }
}

impl<S: OdeState> ErrorNorm<S> for Weighted {
    fn normalized_error(&self, candidate: &S, error_estimate: &S, _: &S, _: f64) -> f64 {
        if candidate.dim() != self.tolerances.len() {
            return f64::NAN;
        }
        let ratios = error_estimate
            .components()
            .zip(candidate.components())
            .zip(&self.tolerances)
            .map(|((err, y), tol)| err / tol.allowed(y));
        self.combine.reduce(ratios)
    }
}
