/// Watches an integration run and optionally steers it.
///
/// Solvers emit an event after every accepted step. An observer can record
/// the trajectory as it grows, log progress, or end the run early by returning
/// a solver-specific action. Returning `None` lets the run continue.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the no-op
/// observer used by the `*_unobserved` entry points.
pub trait Observer<E, A> {
    /// Receives an event and returns an action, if any.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Halt {
        Now,
    }

    fn feed<O: Observer<f64, Halt>>(observer: &mut O, times: &[f64]) -> Option<usize> {
        times
            .iter()
            .position(|t| observer.observe(t) == Some(Halt::Now))
    }

    #[test]
    fn closure_can_halt() {
        let mut seen = 0;
        let mut observer = |t: &f64| {
            seen += 1;
            (*t > 1.0).then_some(Halt::Now)
        };

        assert_eq!(feed(&mut observer, &[0.0, 0.5, 1.5, 2.0]), Some(2));
        assert_eq!(seen, 3);
    }

    #[test]
    fn unit_never_halts() {
        assert_eq!(feed(&mut (), &[0.0, 1.0, 2.0]), None);
    }
}
