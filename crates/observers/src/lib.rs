//! Reusable observers for Cash-Karp integration runs.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any solver whose events and actions implement them.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasStep`], [`HasTime`], [`HasStepSize`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — logs each event through the `log` facade
//! - [`StepLimit`] — stops a run after a number of accepted steps
//!
//! Observers are values, so several can be combined in a closure:
//!
//! ```rust
//! use cashkarp_core::Observer;
//! use cashkarp_observers::{LogObserver, StepLimit};
//! use cashkarp_solvers::transient::cash_karp::{self, Action, Config, Event};
//!
//! let decay = |y: &f64, _t: f64| -y;
//! let norm = |y: &f64, err: &f64, _dy: &f64, _dt: f64| (err / y).abs() / 1e-6;
//!
//! let mut log = LogObserver::default();
//! let mut limit = StepLimit::new(10);
//! let observer = |event: &Event<'_, f64>| {
//!     let _: Option<Action> = log.observe(event);
//!     let action: Option<Action> = limit.observe(event);
//!     action
//! };
//!
//! let solution =
//!     cash_karp::solve(&decay, &norm, 1.0, [0.0, 100.0], 0.1, &Config::default(), observer)
//!         .unwrap();
//! assert_eq!(solution.stats.accepted, 10);
//! ```
//!
//! [`Observer`]: cashkarp_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`HasTime`]: traits::HasTime
//! [`HasStepSize`]: traits::HasStepSize
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod limit;
mod logging;

pub use limit::StepLimit;
pub use logging::LogObserver;
