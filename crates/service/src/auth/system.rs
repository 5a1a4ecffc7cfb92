//! Time and identifier sources, injected so the service stays deterministic
//! under test.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> Uuid;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random (version 4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock and predictable ids for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    pub struct FixedClock {
        at: Mutex<DateTime<Utc>>,
    }

    impl FixedClock {
        pub fn new(at: DateTime<Utc>) -> Self {
            Self { at: Mutex::new(at) }
        }

        pub fn advance(&self, by: chrono::Duration) {
            if let Ok(mut at) = self.at.lock() {
                *at += by;
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            match self.at.lock() {
                Ok(at) => *at,
                Err(poisoned) => *poisoned.into_inner(),
            }
        }
    }

    /// Yields `00000000-0000-0000-0000-000000000001`, `...0002`, ...
    #[derive(Default)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl IdGenerator for SequentialIds {
        fn new_id(&self) -> Uuid {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u64_pair(0, n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{FixedClock, SequentialIds};
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn v4_ids_are_random() {
        let gen = UuidV4Generator;
        let a = gen.new_id();
        let b = gen.new_id();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn fixed_clock_only_moves_when_told() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(chrono::Duration::minutes(5));
        assert_eq!(clock.now(), start + chrono::Duration::minutes(5));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::default();
        assert_eq!(ids.new_id().as_u128(), 1);
        assert_eq!(ids.new_id().as_u128(), 2);
    }
}
