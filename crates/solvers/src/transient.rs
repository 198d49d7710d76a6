//! Solvers for transient problems, integrating ODE systems through time.
//!
//! A [`DerivativeFn`] gives the rate of change of an [`OdeState`]. Solvers in
//! this module step that state from a start time to an end time and record
//! the trajectory.
//!
//! # Solvers
//!
//! - [`cash_karp`] — embedded Runge-Kutta 4(5) with adaptive step control
//!
//! [`DerivativeFn`]: cashkarp_core::DerivativeFn
//! [`OdeState`]: cashkarp_core::OdeState

pub mod cash_karp;
