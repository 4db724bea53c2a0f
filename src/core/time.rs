use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Clock abstracts access to the current timestamp so "today" stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the calendar date the user is living in.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock. `today` follows the local time zone, matching what the
/// user sees on their wall calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.today.and_time(NaiveTime::MIN), Utc)
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
