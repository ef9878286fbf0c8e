// crates/shared-kernel/src/clock/mod.rs

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
