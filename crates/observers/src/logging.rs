use cashkarp_core::Observer;
use log::{Level, log, log_enabled};

use crate::traits::{HasStep, HasStepSize, HasTime};

/// Logs every event through the `log` facade.
///
/// Each event becomes one record under the `cashkarp::progress` target with
/// the step number, time, and step sizes. Nothing is emitted unless the
/// application installs a logger that enables the chosen level.
///
/// Set `every` to thin the output: only steps divisible by it are logged.
/// Step 0 is always logged.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    level: Level,
    every: usize,
}

impl LogObserver {
    /// Creates an observer that logs every event at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level, every: 1 }
    }

    /// Returns a copy that only logs every `every`-th step.
    ///
    /// A value of zero is treated as one.
    #[must_use]
    pub fn every(self, every: usize) -> Self {
        Self {
            every: every.max(1),
            ..self
        }
    }

    fn should_log(&self, step: usize) -> bool {
        step % self.every == 0
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: HasStep + HasTime + HasStepSize,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.should_log(event.step()) && log_enabled!(target: "cashkarp::progress", self.level) {
            log!(
                target: "cashkarp::progress",
                self.level,
                "step {}: t = {}, dt = {:e}, next dt = {:e}",
                event.step(),
                event.time(),
                event.dt_used(),
                event.dt_next()
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Never {}

    struct Sample(usize);

    impl HasStep for Sample {
        fn step(&self) -> usize {
            self.0
        }
    }

    impl HasTime for Sample {
        fn time(&self) -> f64 {
            self.0 as f64 * 0.5
        }
    }

    impl HasStepSize for Sample {
        fn dt_used(&self) -> f64 {
            0.5
        }

        fn dt_next(&self) -> f64 {
            0.5
        }
    }

    #[test]
    fn never_steers_the_run() {
        let mut observer = LogObserver::default();

        for step in 0..5 {
            let action: Option<Never> = observer.observe(&Sample(step));
            assert_eq!(action, None);
        }
    }

    #[test]
    fn thins_output_by_step() {
        let observer = LogObserver::new(Level::Info).every(3);

        let logged: Vec<usize> = (0..10).filter(|&s| observer.should_log(s)).collect();

        assert_eq!(logged, vec![0, 3, 6, 9]);
        assert!(LogObserver::new(Level::Info).every(0).should_log(7));
    }
}
