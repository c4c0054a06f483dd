use std::thread;
use std::time::Duration;

use super::{LoopDriver, LoopState};

/// Blocking poll-then-sleep loop owned by the program.
#[derive(Debug, Clone)]
pub struct SelfDriven {
    interval: Duration,
    ticks: u64,
}

impl SelfDriven {
    pub fn new(interval: Duration) -> Self {
        Self { interval, ticks: 0 }
    }

    /// Ticks run by the last `drive`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl<B> LoopDriver<B> for SelfDriven {
    fn name(&self) -> &'static str {
        "self-driven"
    }

    fn drive(&mut self, backend: &mut B, tick: &mut dyn FnMut(&mut B) -> LoopState) {
        self.ticks = 0;

        loop {
            self.ticks += 1;
            if tick(backend) == LoopState::Stopped {
                break;
            }
            // Only yield point of the loop.
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }

        log::debug!("self-driven loop exited after {} ticks", self.ticks);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn stops_on_the_tick_that_reports_stopped() {
        let mut driver = SelfDriven::new(Duration::ZERO);
        let mut remaining = 3;

        driver.drive(&mut (), &mut |_| {
            remaining -= 1;
            if remaining == 0 { LoopState::Stopped } else { LoopState::Running }
        });

        assert_eq!(driver.ticks(), 3);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn no_sleep_after_the_final_tick() {
        let mut driver = SelfDriven::new(Duration::from_secs(5));
        let started = Instant::now();

        driver.drive(&mut (), &mut |_| LoopState::Stopped);

        assert_eq!(driver.ticks(), 1);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn sleeps_between_ticks() {
        let mut driver = SelfDriven::new(Duration::from_millis(5));
        let started = Instant::now();
        let mut n = 0;

        driver.drive(&mut (), &mut |_| {
            n += 1;
            if n == 3 { LoopState::Stopped } else { LoopState::Running }
        });

        assert!(started.elapsed() >= Duration::from_millis(10));
    }
}
