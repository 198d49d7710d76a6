//! Adaptive-step Cash-Karp Runge-Kutta 4(5) solver for ODE systems.
//!
//! Each step evaluates six derivative samples and combines them twice: once
//! into a fifth-order estimate of the next state, and once into the difference
//! between the fourth- and fifth-order estimates:
//!
//! ```text
//! state_{n+1} = state_n + Σ c_i k_i
//! error       =           Σ d_i k_i
//! ```
//!
//! The error estimate is never added to the state. It is handed to an
//! [`ErrorNorm`] that decides whether the step is accepted.
//!
//! # Step control
//!
//! For a normalized error `e` reported by the norm:
//!
//! - `e <= 1`: the step is accepted and the next step is proposed as
//!   `0.9 * dt * e^(-1/5)`, optionally capped by [`Config::with_max_growth`].
//! - `e > 1`: the step is retried with `dt * max(0.9 * e^(-1/4), 0.1)`.
//!
//! A step that is still rejected after [`Config::max_attempts`] trials fails
//! the run with [`Error::StepBudgetExhausted`].
//!
//! # Modes
//!
//! [`Mode::Adaptive`] uses the step control above. [`Mode::Fixed`] takes every
//! step with the initial step size and ignores the error estimate, which makes
//! it a useful baseline.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] for the initial sample and one after each
//! accepted step. Observers can return [`Action::StopEarly`] to end the run.
//!
//! # Example
//!
//! ```ignore
//! use cashkarp_solvers::transient::cash_karp::{self, norm::Relative};
//!
//! let decay = |y: &f64, _t: f64| -y;
//! let norm = Relative::new(1e-6)?;
//!
//! let solution = cash_karp::integrate(1.0, &decay, &norm, 0.0, 10.0, 0.08, true)?;
//!
//! for (t, y) in solution.times.iter().zip(&solution.states) {
//!     println!("t={t}: {y}");
//! }
//! ```

mod action;
mod config;
mod controller;
mod counted;
mod error;
mod event;
mod formula;
mod solution;
mod tableau;

pub mod norm;


pub use action::Action;
pub use config::{Config, ConfigError, Mode};
pub use controller::{Accepted, attempt_step};
pub use error::Error;
pub use event::Event;
pub use formula::{Estimate, step};
pub use solution::{Solution, Stats, Status};
pub use tableau::{CASH_KARP, STAGES, Tableau};

use cashkarp_core::{DerivativeFn, ErrorNorm, Observer, OdeState};
use log::{debug, trace};

use counted::Counted;

/// Integrates an ODE system over `span` using the Cash-Karp pair.
///
/// # Algorithm
///
/// 1. Validate the initial state, span, and step size.
/// 2. Record the initial sample and emit the step 0 event.
/// 3. While `t < span[1]`:
///    - Evaluate the derivative once at the current sample.
///    - Adaptive mode: run the step controller with the step size proposed by
///      the previous step (the initial step size on the first pass).
///    - Fixed mode: take one step with the initial step size.
///    - Advance time by the step size actually used and record the new sample.
///    - Emit an [`Event`]; stop if the observer returns [`Action::StopEarly`].
/// 4. Return the solution. The last sample may lie past `span[1]`.
///
/// # Errors
///
/// Returns an error if the inputs are invalid, if a step cannot be accepted,
/// or if the run produces a non-finite or differently sized state.
/// See [`Error`] for details.
pub fn solve<S, F, N, Obs>(
    system: &F,
    norm: &N,
    initial: S,
    span: [f64; 2],
    dt: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<S>, Error>
where
    S: OdeState,
    F: DerivativeFn<S> + ?Sized,
    N: ErrorNorm<S> + ?Sized,
    Obs: for<'a> Observer<Event<'a, S>, Action>,
{
    let [start, end] = span;
    validate(&initial, start, end, dt)?;

    debug!(
        "cash-karp: integrating {} coordinates from t = {start} to t = {end} ({:?}, dt = {dt:e})",
        initial.dim(),
        config.mode()
    );

    let system = Counted::new(system);
    let dim = initial.dim();

    let mut times = vec![start];
    let mut states = vec![initial];
    let mut stats = Stats::default();

    let event = Event::initial(start, &states[0], dt);
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            times,
            states,
            stats,
        });
    }

    let mut t = start;
    let mut dt_next = dt;

    while t < end {
        let current = &states[states.len() - 1];

        let derivative = system.derivative(current, t);
        check_dim(dim, &derivative)?;

        let advance = match config.mode() {
            Mode::Adaptive => {
                let accepted = controller::attempt_step(
                    current,
                    &derivative,
                    &system,
                    norm,
                    t,
                    dt_next,
                    config,
                )?;
                stats.rejected += accepted.attempts - 1;
                Advance {
                    state: accepted.state,
                    dt_used: accepted.dt_used,
                    dt_next: accepted.dt_next,
                    normalized_error: Some(accepted.normalized_error),
                    attempts: accepted.attempts,
                }
            }
            Mode::Fixed => Advance {
                state: formula::step(current, &derivative, &system, t, dt)?.state,
                dt_used: dt,
                dt_next: dt,
                normalized_error: None,
                attempts: 1,
            },
        };

        let next_t = t + advance.dt_used;
        if next_t <= t {
            return Err(Error::StepSizeUnderflow {
                time: t,
                step_size: advance.dt_used,
            });
        }
        check_dim(dim, &advance.state)?;
        if !advance.state.is_finite() {
            return Err(Error::NonFiniteState { time: next_t });
        }

        trace!(
            "cash-karp: accepted t = {next_t} (dt = {:e}, next = {:e}, attempts = {})",
            advance.dt_used, advance.dt_next, advance.attempts
        );

        t = next_t;
        dt_next = advance.dt_next;
        stats.accepted += 1;
        stats.evaluations = system.calls();

        times.push(t);
        states.push(advance.state);

        let event = Event {
            step: stats.accepted,
            time: t,
            state: &states[states.len() - 1],
            dt_used: advance.dt_used,
            dt_next,
            normalized_error: advance.normalized_error,
            attempts: advance.attempts,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                times,
                states,
                stats,
            });
        }
    }

    debug!(
        "cash-karp: finished at t = {t} after {} steps ({} rejected, {} evaluations)",
        stats.accepted, stats.rejected, stats.evaluations
    );

    Ok(Solution {
        status: Status::Complete,
        times,
        states,
        stats,
    })
}

/// Integrates an ODE system over `span` without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<S, F, N>(
    system: &F,
    norm: &N,
    initial: S,
    span: [f64; 2],
    dt: f64,
    config: &Config,
) -> Result<Solution<S>, Error>
where
    S: OdeState,
    F: DerivativeFn<S> + ?Sized,
    N: ErrorNorm<S> + ?Sized,
{
    solve(system, norm, initial, span, dt, config, ())
}

/// Integrates from `t0` to `t1` with the default step policy.
///
/// `adaptive` selects between [`Mode::Adaptive`] and [`Mode::Fixed`]. In fixed
/// mode `dt` is used for every step and `norm` is never called.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn integrate<S, F, N>(
    initial: S,
    system: &F,
    norm: &N,
    t0: f64,
    t1: f64,
    dt: f64,
    adaptive: bool,
) -> Result<Solution<S>, Error>
where
    S: OdeState,
    F: DerivativeFn<S> + ?Sized,
    N: ErrorNorm<S> + ?Sized,
{
    let mode = if adaptive {
        Mode::Adaptive
    } else {
        Mode::Fixed
    };
    let config = Config::default().with_mode(mode);
    solve_unobserved(system, norm, initial, [t0, t1], dt, &config)
}

/// The outcome of one pass of the driver loop.
struct Advance<S> {
    state: S,
    dt_used: f64,
    dt_next: f64,
    normalized_error: Option<f64>,
    attempts: usize,
}

fn validate<S: OdeState>(initial: &S, start: f64, end: f64, dt: f64) -> Result<(), Error> {
    if initial.dim() == 0 {
        return Err(Error::EmptyState);
    }
    if !initial.is_finite() {
        return Err(Error::NonFiniteState { time: start });
    }
    if !start.is_finite() || !end.is_finite() || end < start {
        return Err(Error::InvalidSpan { start, end });
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidStepSize { step_size: dt });
    }
    Ok(())
}

fn check_dim<S: OdeState>(expected: usize, state: &S) -> Result<(), Error> {
    let found = state.dim();
    if found == expected {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, found })
    }
}
