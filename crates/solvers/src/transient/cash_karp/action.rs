/// Control actions supported by the Cash-Karp solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the trajectory accumulated so far.
    StopEarly,
}
