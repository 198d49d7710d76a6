//! Core traits for embedded Runge-Kutta integration.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`OdeState`] — a fixed-length vector that can be scaled and accumulated
//! - [`DerivativeFn`] — the right-hand side `f(y, t)` of an ODE system
//! - [`ErrorNorm`] — the policy that accepts or rejects a trial step
//! - [`Observer`] — receives solver events and optionally returns control actions

mod observer;
mod state;
mod system;

pub use observer::Observer;
pub use state::OdeState;
pub use system::{DerivativeFn, ErrorNorm};
