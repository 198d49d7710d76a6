//! Numerical solvers built on `cashkarp-core`.
//!
//! - [`transient::cash_karp`] — adaptive-step Cash-Karp RK45 integration

pub mod transient;
