use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

/// Source of cycle timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the host's local time, or in `timezone` when one is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub timezone: Option<Tz>,
}

impl SystemClock {
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).fixed_offset(),
            None => Local::now().fixed_offset(),
        }
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
