/// Event emitted by the Cash-Karp solver for each trajectory sample.
///
/// Step 0 is the initial sample: `dt_used` is zero, `dt_next` is the initial
/// step size, and `attempts` is zero. Steps 1..N follow each accepted step.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, S> {
    /// The step number (0 for the initial sample).
    pub step: usize,

    /// Time of the sample.
    pub time: f64,

    /// State at `time`.
    pub state: &'a S,

    /// Step size that advanced time to this sample.
    pub dt_used: f64,

    /// Step size the solver will try next.
    pub dt_next: f64,

    /// Normalized error of the accepted step, if the error norm was consulted.
    ///
    /// `None` for the initial sample and in fixed-step mode.
    pub normalized_error: Option<f64>,

    /// Trial steps spent on this sample, including the accepted one.
    pub attempts: usize,
}

impl<'a, S> Event<'a, S> {
    pub(super) fn initial(time: f64, state: &'a S, dt: f64) -> Self {
        Self {
            step: 0,
            time,
            state,
            dt_used: 0.0,
            dt_next: dt,
            normalized_error: None,
            attempts: 0,
        }
    }
}
