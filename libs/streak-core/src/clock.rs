//! Time sources.

use chrono::{DateTime, Duration, Local, TimeZone};
use std::sync::{Arc, Mutex};

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
    /// Timezone whose calendar defines "today".
    type Tz: TimeZone<Offset: Send + Sync> + Send + Sync + 'static;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock<Tz: TimeZone> {
    instant: Arc<Mutex<DateTime<Tz>>>,
}

impl<Tz: TimeZone> ManualClock<Tz> {
    pub fn new(start: DateTime<Tz>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Tz>) {
        *self.instant.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.instant.lock().unwrap_or_else(|e| e.into_inner());
        *guard = guard.clone() + by;
    }
}

impl<Tz> Clock for ManualClock<Tz>
where
    Tz: TimeZone<Offset: Send + Sync> + Send + Sync + 'static,
{
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.instant.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
