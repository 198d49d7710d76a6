use cashkarp_core::OdeState;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached or passed the end of the time span.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// Work counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Accepted steps, equal to the number of samples after the initial one.
    pub accepted: usize,

    /// Rejected trial steps.
    pub rejected: usize,

    /// Derivative evaluations.
    pub evaluations: usize,
}

/// The result of a Cash-Karp integration.
///
/// `times` is strictly increasing and starts at the requested start time.
/// The last sample may lie past the requested end time.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the solver terminated.
    pub status: Status,

    /// Sample times, including the start time.
    pub times: Vec<f64>,

    /// States at each sample time.
    pub states: Vec<S>,

    /// Work counters.
    pub stats: Stats,
}

impl<S: OdeState> Solution<S> {
    /// Returns the final sample.
    #[must_use]
    pub fn last(&self) -> Option<(f64, &S)> {
        Some((*self.times.last()?, self.states.last()?))
    }

    /// Returns the state at `t`, interpolating linearly between samples.
    ///
    /// Returns `None` if `t` lies outside the sampled range.
    #[must_use]
    pub fn state_at(&self, t: f64) -> Option<S> {
        let (&first, &last) = (self.times.first()?, self.times.last()?);
        if !(first..=last).contains(&t) {
            return None;
        }

        let upper = self.times.partition_point(|&time| time < t);
        if self.times[upper] == t {
            return Some(self.states[upper].clone());
        }

        let lower = upper - 1;
        let (t0, t1) = (self.times[lower], self.times[upper]);
        let weight = (t - t0) / (t1 - t0);

        let mut state = self.states[lower].scaled(1.0 - weight);
        state.add_scaled(weight, &self.states[upper]);
        Some(state)
    }
}
