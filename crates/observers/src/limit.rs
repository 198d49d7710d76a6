use cashkarp_core::Observer;

use crate::traits::{CanStopEarly, HasStep};

/// Stops a run after a fixed number of accepted steps.
///
/// Useful as a guard against runs whose step size collapses and would
/// otherwise take an unbounded number of steps to cover the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLimit {
    max_steps: usize,
}

impl StepLimit {
    /// Creates a limit of `max_steps` accepted steps.
    #[must_use]
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }
}

impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StepLimit {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.step() >= self.max_steps).then(A::stop_early)
    }
}
