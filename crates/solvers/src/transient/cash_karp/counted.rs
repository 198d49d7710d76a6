use std::cell::Cell;

use cashkarp_core::{DerivativeFn, OdeState};

/// Wraps a derivative function and counts its evaluations.
pub(super) struct Counted<'a, F: ?Sized> {
    inner: &'a F,
    calls: Cell<usize>,
}

impl<'a, F: ?Sized> Counted<'a, F> {
    pub(super) fn new(inner: &'a F) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Number of evaluations so far.
    pub(super) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<S, F> DerivativeFn<S> for Counted<'_, F>
where
    S: OdeState,
    F: DerivativeFn<S> + ?Sized,
{
    fn derivative(&self, state: &S, t: f64) -> S {
        self.calls.set(self.calls.get() + 1);
        self.inner.derivative(state, t)
    }
}
