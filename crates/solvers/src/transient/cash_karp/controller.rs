use cashkarp_core::{DerivativeFn, ErrorNorm, OdeState};
use log::{debug, warn};

use super::{Config, Error, formula};

/// Exponent for growing the step after an accepted attempt.
const GROW_EXPONENT: f64 = -0.2;

/// Exponent for shrinking the step after a rejected attempt.
const SHRINK_EXPONENT: f64 = -0.25;

/// Smallest normalized error used when proposing growth.
///
/// Keeps the proposal finite when a step is exact to machine precision.
const ERROR_FLOOR: f64 = 1e-10;

/// A step accepted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<S> {
    /// State at `t + dt_used`.
    pub state: S,

    /// Embedded error estimate of the accepted step.
    pub error_estimate: S,

    /// Normalized error reported by the norm for this step, always `<= 1`.
    pub normalized_error: f64,

    /// Step size that produced `state`.
    pub dt_used: f64,

    /// Step size proposed for the next step.
    pub dt_next: f64,

    /// Number of trial steps taken, including the accepted one.
    pub attempts: usize,
}

/// Takes one adaptive step, shrinking `dt` until the error norm accepts it.
///
/// `derivative` is the derivative at `(state, t)` and is reused by every
/// attempt. Each attempt evaluates `system` five times and `norm` once.
///
/// On acceptance the next step is proposed as `safety * dt * e^(-1/5)`.
/// On rejection `dt` shrinks by `max(safety * e^(-1/4), min_shrink)`.
/// An infinite normalized error counts as a rejection.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if a stage slope changes dimension.
/// - [`Error::InvalidErrorNorm`] if the norm returns `NaN` or a negative value.
/// - [`Error::StepBudgetExhausted`] if no attempt is accepted within
///   [`Config::max_attempts`].
pub fn attempt_step<S, F, N>(
    state: &S,
    derivative: &S,
    system: &F,
    norm: &N,
    t: f64,
    dt: f64,
    config: &Config,
) -> Result<Accepted<S>, Error>
where
    S: OdeState,
    F: DerivativeFn<S> + ?Sized,
    N: ErrorNorm<S> + ?Sized,
{
    let mut dt = dt;
    let mut tried = dt;
    let mut last_error = f64::NAN;

    for attempt in 1..=config.max_attempts() {
        let estimate = formula::step(state, derivative, system, t, dt)?;
        let normalized_error =
            norm.normalized_error(&estimate.state, &estimate.error, derivative, dt);

        if normalized_error.is_nan() || normalized_error < 0.0 {
            warn!("error norm returned {normalized_error} at t = {t} (dt = {dt:e})");
            return Err(Error::InvalidErrorNorm {
                time: t,
                step_size: dt,
                value: normalized_error,
            });
        }

        if normalized_error <= 1.0 {
            return Ok(Accepted {
                state: estimate.state,
                error_estimate: estimate.error,
                normalized_error,
                dt_used: dt,
                dt_next: (dt * growth(normalized_error, config)).min(f64::MAX),
                attempts: attempt,
            });
        }

        let shrink =
            (config.safety() * normalized_error.powf(SHRINK_EXPONENT)).max(config.min_shrink());
        debug!(
            "rejected step at t = {t}: dt = {dt:e}, error = {normalized_error:e}, retry with {:e}",
            dt * shrink
        );

        tried = dt;
        last_error = normalized_error;
        dt *= shrink;
    }

    warn!(
        "no step accepted at t = {t} after {} attempts (dt = {tried:e}, error = {last_error:e})",
        config.max_attempts()
    );
    Err(Error::StepBudgetExhausted {
        time: t,
        step_size: tried,
        normalized_error: last_error,
        attempts: config.max_attempts(),
    })
}

/// Factor applied to an accepted step to propose the next one.
fn growth(normalized_error: f64, config: &Config) -> f64 {
    let factor = config.safety() * normalized_error.max(ERROR_FLOOR).powf(GROW_EXPONENT);
    config
        .max_growth()
        .map_or(factor, |ceiling| factor.min(ceiling))
}
