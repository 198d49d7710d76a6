//! Capability traits for reusable observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once and attached to any run whose events and
//! actions expose the needed capabilities.
//!
//! # Event traits
//!
//! - [`HasStep`] — events numbered by accepted step
//! - [`HasTime`] — events that carry the sample time
//! - [`HasStepSize`] — events that carry the step sizes used and proposed
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use cashkarp_core::Observer;
//! use cashkarp_observers::traits::{CanStopEarly, HasTime};
//!
//! struct StopAt {
//!     time: f64,
//! }
//!
//! impl<E: HasTime, A: CanStopEarly> Observer<E, A> for StopAt {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.time() >= self.time).then(A::stop_early)
//!     }
//! }
//! ```

use cashkarp_solvers::transient::cash_karp;

/// An event numbered by accepted step, starting at 0.
pub trait HasStep {
    /// Returns the step number of this event.
    fn step(&self) -> usize;
}

/// An event that carries the time of a sample.
pub trait HasTime {
    /// Returns the sample time.
    fn time(&self) -> f64;
}

/// An event that carries step sizes.
pub trait HasStepSize {
    /// Returns the step size that produced this sample.
    fn dt_used(&self) -> f64;

    /// Returns the step size the solver will try next.
    fn dt_next(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- cash_karp::Event ---

impl<S> HasStep for cash_karp::Event<'_, S> {
    fn step(&self) -> usize {
        self.step
    }
}

impl<S> HasTime for cash_karp::Event<'_, S> {
    fn time(&self) -> f64 {
        self.time
    }
}

impl<S> HasStepSize for cash_karp::Event<'_, S> {
    fn dt_used(&self) -> f64 {
        self.dt_used
    }

    fn dt_next(&self) -> f64 {
        self.dt_next
    }
}

// --- cash_karp::Action ---

impl CanStopEarly for cash_karp::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
