use thiserror::Error;

/// Errors that can occur during Cash-Karp integration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("initial state has no coordinates")]
    EmptyState,

    #[error("state contains a non-finite value at t = {time}")]
    NonFiniteState { time: f64 },

    #[error("invalid time span: start = {start}, end = {end}")]
    InvalidSpan { start: f64, end: f64 },

    #[error("step size must be positive and finite, got {step_size}")]
    InvalidStepSize { step_size: f64 },

    #[error("state dimension changed: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error(
        "non-convergent step at t = {time}: no step accepted after {attempts} attempts \
         (last step size {step_size}, normalized error {normalized_error})"
    )]
    StepBudgetExhausted {
        time: f64,
        step_size: f64,
        normalized_error: f64,
        attempts: usize,
    },

    #[error("error norm returned invalid value {value} at t = {time} with step size {step_size}")]
    InvalidErrorNorm {
        time: f64,
        step_size: f64,
        value: f64,
    },

    #[error("step size {step_size} no longer advances time at t = {time}")]
    StepSizeUnderflow { time: f64, step_size: f64 },
}
