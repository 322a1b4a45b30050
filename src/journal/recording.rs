//! # Recording Journal
//!
//! An in-memory [`Journal`] that keeps every event in the order it was
//! recorded. The vector's order is a total order over all philosophers, so
//! the checks below read intervals straight off it:
//!
//! - [`RecordingJournal::check_meals`]: every philosopher starts and finishes
//!   each of its meals exactly once, in order.
//! - [`RecordingJournal::max_concurrent_eaters`]: the most philosophers
//!   between a start and a finish at the same point of the log.
//! - [`RecordingJournal::check_fork_exclusion`]: no fork is picked up while
//!   someone else holds it, and nobody eats without holding two forks.
//!
//! This module lives outside `#[cfg(test)]` so integration tests can use it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::{DiningEvent, Journal};
use crate::error::Result;

/// Cloneable handle to a shared, sequenced event log.
#[derive(Clone, Debug, Default)]
pub struct RecordingJournal {
    events: Arc<Mutex<Vec<DiningEvent>>>,
}

impl RecordingJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiningEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The lines a [`LineJournal`](super::LineJournal) would have written.
    pub fn lines(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter(|event| event.is_eating_line())
            .map(ToString::to_string)
            .collect()
    }

    /// Checks that philosophers `1..=philosophers` each ate exactly `meals`
    /// meals, with every start followed by its finish before the next start,
    /// and reported `Done` last.
    pub fn check_meals(&self, philosophers: usize, meals: u32) -> std::result::Result<(), String> {
        let mut eaten: BTreeMap<usize, u32> = BTreeMap::new();
        let mut eating: BTreeSet<usize> = BTreeSet::new();
        let mut done: BTreeSet<usize> = BTreeSet::new();

        for event in self.events() {
            let p = event.philosopher();
            if done.contains(&p) {
                return Err(format!("philosopher {p} acted after leaving: {event}"));
            }
            match event {
                DiningEvent::StartedEating { meal, .. } => {
                    let expected = eaten.get(&p).copied().unwrap_or(0) + 1;
                    if meal != expected || !eating.insert(p) {
                        return Err(format!(
                            "philosopher {p} started meal {meal}, expected meal {expected}"
                        ));
                    }
                }
                DiningEvent::FinishedEating { meal, .. } => {
                    if !eating.remove(&p) {
                        return Err(format!("philosopher {p} finished meal {meal} without starting"));
                    }
                    *eaten.entry(p).or_default() += 1;
                }
                DiningEvent::Done { .. } => {
                    done.insert(p);
                }
                _ => {}
            }
        }

        for p in 1..=philosophers {
            let count = eaten.get(&p).copied().unwrap_or(0);
            if count != meals {
                return Err(format!("philosopher {p} ate {count} meals, expected {meals}"));
            }
            if !done.contains(&p) {
                return Err(format!("philosopher {p} never left the table"));
            }
        }
        if let Some(stranger) = eaten.keys().find(|p| **p == 0 || **p > philosophers) {
            return Err(format!("unknown philosopher {stranger} ate"));
        }
        Ok(())
    }

    /// Greatest number of philosophers simultaneously between a start and a
    /// finish anywhere in the log.
    pub fn max_concurrent_eaters(&self) -> usize {
        let mut eating = 0usize;
        let mut peak = 0usize;
        for event in self.events() {
            match event {
                DiningEvent::StartedEating { .. } => {
                    eating += 1;
                    peak = peak.max(eating);
                }
                DiningEvent::FinishedEating { .. } => eating = eating.saturating_sub(1),
                _ => {}
            }
        }
        peak
    }

    /// Checks that no fork ever has two holders, that only the holder puts a
    /// fork down, and that every meal is eaten holding two forks.
    pub fn check_fork_exclusion(&self) -> std::result::Result<(), String> {
        let mut holder: BTreeMap<usize, usize> = BTreeMap::new();
        let mut held_by: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();

        for event in self.events() {
            match event {
                DiningEvent::PickedUpFork { philosopher, fork } => {
                    if let Some(other) = holder.insert(fork, philosopher) {
                        return Err(format!(
                            "fork {fork} picked up by {philosopher} while held by {other}"
                        ));
                    }
                    held_by.entry(philosopher).or_default().insert(fork);
                }
                DiningEvent::PutDownFork { philosopher, fork } => {
                    if holder.remove(&fork) != Some(philosopher) {
                        return Err(format!(
                            "fork {fork} put down by {philosopher}, who did not hold it"
                        ));
                    }
                    held_by.entry(philosopher).or_default().remove(&fork);
                }
                DiningEvent::StartedEating { philosopher, meal } => {
                    let forks = held_by.get(&philosopher).map_or(0, BTreeSet::len);
                    if forks != 2 {
                        return Err(format!(
                            "philosopher {philosopher} started meal {meal} holding {forks} forks"
                        ));
                    }
                }
                _ => {}
            }
        }

        match holder.iter().next() {
            Some((fork, p)) => Err(format!("fork {fork} still held by {p} at the end")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Journal for RecordingJournal {
    async fn record(&self, event: DiningEvent) -> Result<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}
