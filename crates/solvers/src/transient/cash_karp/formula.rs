use cashkarp_core::{DerivativeFn, OdeState};

use super::{
    Error, check_dim,
    tableau::{CASH_KARP, STAGES},
};

/// The outcome of a single trial step.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate<S> {
    /// Fifth-order estimate of the state at `t + dt`.
    pub state: S,

    /// Fourth-order minus fifth-order difference, used only as an error signal.
    pub error: S,
}

/// Takes one Cash-Karp step of size `dt` from `state` at time `t`.
///
/// `derivative` must be the derivative at `(state, t)`. It becomes the first
/// stage, so the system is evaluated exactly five more times. Callers that
/// retry a step with a smaller `dt` can pass the same derivative again.
///
/// The function is pure: it has no side effects beyond calling `system`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `derivative` or any stage slope
/// returned by `system` has a different dimension than `state`.
pub fn step<S, F>(
    state: &S,
    derivative: &S,
    system: &F,
    t: f64,
    dt: f64,
) -> Result<Estimate<S>, Error>
where
    S: OdeState,
    F: DerivativeFn<S> + ?Sized,
{
    let tableau = &CASH_KARP;
    let dim = state.dim();
    check_dim(dim, derivative)?;

    let mut stages: Vec<S> = Vec::with_capacity(STAGES);
    stages.push(derivative.scaled(dt));

    for i in 1..STAGES {
        let mut stage_state = state.clone();
        for (weight, k) in tableau.b[i].iter().zip(&stages) {
            stage_state.add_scaled(*weight, k);
        }
        let slope = system.derivative(&stage_state, t + tableau.a[i] * dt);
        check_dim(dim, &slope)?;
        stages.push(slope.scaled(dt));
    }

    let mut next = state.clone();
    let mut error = stages[0].scaled(tableau.d[0]);
    for (i, k) in stages.iter().enumerate() {
        next.add_scaled(tableau.c[i], k);
        if i > 0 {
            error.add_scaled(tableau.d[i], k);
        }
    }

    Ok(Estimate { state: next, error })
}
