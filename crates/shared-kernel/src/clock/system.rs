// crates/shared-kernel/src/clock/system.rs

use crate::clock::Clock;
use chrono::{DateTime, Utc};

/// Horloge réelle du processus
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
