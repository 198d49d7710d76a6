use crate::OdeState;

/// The right-hand side of an ODE system, `dy/dt = f(y, t)`.
///
/// Implementations must be pure: the same state and time always produce the
/// same derivative. Solvers treat every call as potentially expensive and
/// reuse derivatives wherever the scheme allows.
///
/// Closures of the form `Fn(&S, f64) -> S` implement this trait automatically.
pub trait DerivativeFn<S: OdeState> {
    /// Returns the derivative of `state` at time `t`.
    ///
    /// The result must have the same dimension as `state`.
    fn derivative(&self, state: &S, t: f64) -> S;
}

impl<S, F> DerivativeFn<S> for F
where
    S: OdeState,
    F: Fn(&S, f64) -> S,
{
    fn derivative(&self, state: &S, t: f64) -> S {
        self(state, t)
    }
}

/// Decides whether the local error of a candidate step is acceptable.
///
/// A norm maps the outcome of one trial step to a dimensionless scalar:
/// values `<= 1` accept the step, values `> 1` reject it and ask for a
/// smaller step. How tolerances are mixed and how coordinates are weighted is
/// entirely up to the implementation.
///
/// Closures of the form `Fn(&S, &S, &S, f64) -> f64` implement this trait
/// automatically.
pub trait ErrorNorm<S: OdeState> {
    /// Returns the normalized error of a trial step.
    ///
    /// - `candidate` is the state the step would produce.
    /// - `error_estimate` is the embedded estimate of its local error.
    /// - `initial_derivative` is the derivative at the start of the step.
    /// - `dt` is the step size that was tried.
    ///
    /// The result must be non-negative. Solvers reject `NaN` and negative
    /// values as invalid.
    fn normalized_error(
        &self,
        candidate: &S,
        error_estimate: &S,
        initial_derivative: &S,
        dt: f64,
    ) -> f64;
}

impl<S, F> ErrorNorm<S> for F
where
    S: OdeState,
    F: Fn(&S, &S, &S, f64) -> f64,
{
    fn normalized_error(
        &self,
        candidate: &S,
        error_estimate: &S,
        initial_derivative: &S,
        dt: f64,
    ) -> f64 {
        self(candidate, error_estimate, initial_derivative, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Linear decay with a rate stored on the struct.
    struct Decay {
        rate: f64,
    }

    impl DerivativeFn<Vec<f64>> for Decay {
        fn derivative(&self, state: &Vec<f64>, _t: f64) -> Vec<f64> {
            state.scaled(-self.rate)
        }
    }

    fn evaluate<S: OdeState>(f: &impl DerivativeFn<S>, state: &S, t: f64) -> S {
        f.derivative(state, t)
    }

    #[test]
    fn struct_derivative() {
        let decay = Decay { rate: 2.0 };
        let d = evaluate(&decay, &vec![1.0, -3.0], 0.0);

        assert_eq!(d, vec![-2.0, 6.0]);
    }

    #[test]
    fn closure_derivative_sees_time() {
        let forcing = |_y: &f64, t: f64| t.cos();

        assert_relative_eq!(evaluate(&forcing, &0.0, 0.0), 1.0);
        assert_relative_eq!(evaluate(&forcing, &0.0, std::f64::consts::PI), -1.0);
    }

    #[test]
    fn closure_error_norm() {
        let tolerance = 1e-3;
        let norm = move |_y: &f64, err: &f64, _dy: &f64, _dt: f64| err.abs() / tolerance;

        assert_relative_eq!(norm.normalized_error(&1.0, &-2e-3, &0.0, 0.1), 2.0);
    }
}
