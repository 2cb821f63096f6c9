//! Time source for document timestamps.

/// Supplies the current time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A clock that only moves when told to.
    #[derive(Debug, Clone, Default)]
    pub struct ManualClock {
        now: Rc<Cell<i64>>,
    }

    impl ManualClock {
        pub fn at(ms: i64) -> Self {
            Self {
                now: Rc::new(Cell::new(ms)),
            }
        }

        pub fn set(&self, ms: i64) {
            self.now.set(ms);
        }

        pub fn advance(&self, ms: i64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.now.get()
        }
    }
}
