//! Philosopher states and the report a philosopher hands back when it leaves.

use std::fmt;

/// Where a philosopher is in its dining cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhilosopherState {
    Thinking,
    /// Trying to hold both adjacent forks.
    Hungry,
    /// Holding both forks, waiting for a seat from the host.
    AwaitingHost,
    Eating,
    /// All meals eaten; the task has ended.
    Done,
}

impl PhilosopherState {
    /// Legal moves of the dining cycle.
    pub fn can_become(self, next: PhilosopherState) -> bool {
        use PhilosopherState::*;
        matches!(
            (self, next),
            (Thinking, Hungry)
                | (Hungry, AwaitingHost)
                | (AwaitingHost, Eating)
                | (Eating, Thinking)
                | (Eating, Done)
        )
    }
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhilosopherState::Thinking => "thinking",
            PhilosopherState::Hungry => "hungry",
            PhilosopherState::AwaitingHost => "awaiting host",
            PhilosopherState::Eating => "eating",
            PhilosopherState::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a philosopher did at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealReport {
    pub philosopher: usize,
    pub meals: u32,
    /// Times the second fork was busy and the first had to be put back.
    pub retries: u32,
}

#[cfg(test)]
mod tests {
    use super::PhilosopherState::*;

    #[test]
    fn follows_the_dining_cycle() {
        let cycle = [Thinking, Hungry, AwaitingHost, Eating, Thinking];
        for pair in cycle.windows(2) {
            assert!(pair[0].can_become(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(Eating.can_become(Done));
    }

    #[test]
    fn cannot_skip_the_host_or_come_back() {
        assert!(!Hungry.can_become(Eating));
        assert!(!Thinking.can_become(Eating));
        assert!(!Done.can_become(Thinking));
        assert!(!AwaitingHost.can_become(Thinking));
    }
}
