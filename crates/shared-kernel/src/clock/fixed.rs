// crates/shared-kernel/src/clock/fixed.rs

use crate::clock::Clock;
use chrono::{DateTime, Utc};

/// Horloge figée pour les tests déterministes
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
