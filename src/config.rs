//! # Table Configuration
//!
//! The dinner has no configuration surface: [`TableConfig::default`] is the
//! fixed design (five philosophers, three meals each, a host that admits two
//! diners, one to four seconds per meal). The struct exists so tests can run
//! the same table on a millisecond clock.

use std::time::Duration;

use crate::error::{Result, TableError};

pub const PHILOSOPHERS: usize = 5;
pub const MEALS: u32 = 3;
pub const HOST_CAPACITY: usize = 2;

/// Timing and sizing of one dinner. All delays are counted in `time_unit`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of philosophers, and therefore forks, around the ring.
    pub philosophers: usize,
    /// Meals each philosopher eats before leaving.
    pub meals: u32,
    /// Maximum number of philosophers eating at once.
    pub capacity: usize,
    /// Shortest meal, in time units.
    pub eat_min: u32,
    /// Longest meal, in time units (inclusive).
    pub eat_max: u32,
    /// Pause between meals, in time units.
    pub think: u32,
    /// Upper bound of the random back-off after a failed second fork, in time units.
    pub backoff_max: u32,
    pub time_unit: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            philosophers: PHILOSOPHERS,
            meals: MEALS,
            capacity: HOST_CAPACITY,
            eat_min: 1,
            eat_max: 4,
            think: 1,
            backoff_max: 1,
            time_unit: Duration::from_secs(1),
        }
    }
}

impl TableConfig {
    /// Same table on a faster clock.
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Rejects configurations that cannot form a ring or never let anyone eat.
    pub fn validate(&self) -> Result<()> {
        if self.philosophers < 2 {
            return Err(TableError::InvalidConfig(format!(
                "a ring needs at least 2 philosophers, got {}",
                self.philosophers
            )));
        }
        if self.meals == 0 {
            return Err(TableError::InvalidConfig("meals must be positive".into()));
        }
        if self.capacity == 0 {
            return Err(TableError::InvalidConfig(
                "host capacity must be positive".into(),
            ));
        }
        if self.eat_min > self.eat_max {
            return Err(TableError::InvalidConfig(format!(
                "eat_min ({}) exceeds eat_max ({})",
                self.eat_min, self.eat_max
            )));
        }
        Ok(())
    }

    pub(crate) fn units(&self, n: u32) -> Duration {
        self.time_unit * n
    }
}
