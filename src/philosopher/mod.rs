//! # Philosopher Actor
//!
//! Each philosopher is an independent task that owns its own state and meal
//! counter and touches shared state only through its two forks, the host and
//! the journal.
//!
//! ## One Meal
//!
//! 1. **Hungry**: pick a side at random and wait for that fork, then *try*
//!    the other one. If it is busy, put the first fork back, wait a random
//!    moment and start over with a fresh coin flip. A philosopher therefore
//!    never sits on one fork while waiting for the second, which rules out the
//!    circular wait of the classic deadlock.
//! 2. **AwaitingHost**: holding both forks, ask the host for a seat.
//! 3. **Eating**: record `StartedEating`, eat for a random number of time
//!    units, record `FinishedEating`, then give the seat back and put both
//!    forks down.
//! 4. **Thinking**: pause, then get hungry again; after the last meal the
//!    philosopher is **Done** and its task returns a [`MealReport`].

pub mod state;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::config::TableConfig;
use crate::error::Result;
use crate::journal::{DiningEvent, Journal};
use crate::sync::{Fork, ForkGuard, Host};

pub use state::{MealReport, PhilosopherState};

/// A diner seated between two forks.
pub struct Philosopher {
    id: usize,
    left: Arc<Fork>,
    right: Arc<Fork>,
    host: Arc<Host>,
    journal: Arc<dyn Journal>,
    config: Arc<TableConfig>,
    meals_left: u32,
    state: PhilosopherState,
}

impl Philosopher {
    pub fn new(
        id: usize,
        left: Arc<Fork>,
        right: Arc<Fork>,
        host: Arc<Host>,
        journal: Arc<dyn Journal>,
        config: Arc<TableConfig>,
    ) -> Self {
        let meals_left = config.meals;
        Self {
            id,
            left,
            right,
            host,
            journal,
            config,
            meals_left,
            state: PhilosopherState::Thinking,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> PhilosopherState {
        self.state
    }

    pub fn meals_left(&self) -> u32 {
        self.meals_left
    }

    /// Ids of the (left, right) forks.
    pub fn forks(&self) -> (usize, usize) {
        (self.left.id(), self.right.id())
    }

    /// Eats every meal, then leaves the table.
    #[instrument(name = "philosopher", skip_all, fields(id = self.id))]
    pub async fn dine(mut self) -> Result<MealReport> {
        let mut eaten = 0;
        let mut retries = 0;

        while self.meals_left > 0 {
            self.transition(PhilosopherState::Hungry);
            let (first, second, attempts) = self.pick_up_forks().await?;
            retries += attempts;

            self.transition(PhilosopherState::AwaitingHost);
            let admission = self.host.request_permission(self.id).await?;

            self.transition(PhilosopherState::Eating);
            let meal = eaten + 1;
            self.journal
                .record(DiningEvent::StartedEating {
                    philosopher: self.id,
                    meal,
                })
                .await?;

            let eat_for = self.eating_time();
            debug!(meal, ?eat_for, "Eating");
            tokio::time::sleep(eat_for).await;

            self.journal
                .record(DiningEvent::FinishedEating {
                    philosopher: self.id,
                    meal,
                })
                .await?;
            self.host.release_permission(admission);
            self.put_down(second).await?;
            self.put_down(first).await?;

            eaten = meal;
            self.meals_left -= 1;

            if self.meals_left > 0 {
                self.transition(PhilosopherState::Thinking);
                tokio::time::sleep(self.config.units(self.config.think)).await;
            }
        }

        self.transition(PhilosopherState::Done);
        self.journal
            .record(DiningEvent::Done {
                philosopher: self.id,
            })
            .await?;
        info!(meals = eaten, retries, "Left the table");

        Ok(MealReport {
            philosopher: self.id,
            meals: eaten,
            retries,
        })
    }

    fn transition(&mut self, next: PhilosopherState) {
        debug_assert!(
            self.state.can_become(next),
            "philosopher {} cannot go from {} to {}",
            self.id,
            self.state,
            next
        );
        self.state = next;
    }

    /// Holds both forks on return, together with the number of times the
    /// second fork was busy.
    async fn pick_up_forks(&self) -> Result<(ForkGuard, ForkGuard, u32)> {
        let mut attempts = 0;
        loop {
            let (first, second) = if coin_flip() {
                (&self.left, &self.right)
            } else {
                (&self.right, &self.left)
            };

            let held = first.acquire().await?;
            self.picked_up(&held).await?;

            if let Some(other) = second.try_acquire()? {
                self.picked_up(&other).await?;
                return Ok((held, other, attempts));
            }

            debug!(holding = held.fork(), busy = second.id(), "Second fork busy, backing off");
            self.put_down(held).await?;
            attempts += 1;
            tokio::time::sleep(self.backoff()).await;
        }
    }

    async fn picked_up(&self, guard: &ForkGuard) -> Result<()> {
        debug!(fork = guard.fork(), "Picked up fork");
        self.journal
            .record(DiningEvent::PickedUpFork {
                philosopher: self.id,
                fork: guard.fork(),
            })
            .await
    }

    async fn put_down(&self, guard: ForkGuard) -> Result<()> {
        debug!(fork = guard.fork(), "Dropped fork");
        self.journal
            .record(DiningEvent::PutDownFork {
                philosopher: self.id,
                fork: guard.fork(),
            })
            .await?;
        guard.release();
        Ok(())
    }

    fn eating_time(&self) -> Duration {
        let units = rand::rng().random_range(self.config.eat_min..=self.config.eat_max);
        self.config.units(units)
    }

    fn backoff(&self) -> Duration {
        let fraction: f64 = rand::rng().random_range(0.1..=1.0);
        self.config.units(self.config.backoff_max).mul_f64(fraction)
    }
}

fn coin_flip() -> bool {
    rand::rng().random_bool(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::RecordingJournal;

    fn fast_config(meals: u32) -> Arc<TableConfig> {
        Arc::new(TableConfig {
            meals,
            ..TableConfig::default().with_time_unit(Duration::from_millis(1))
        })
    }

    #[tokio::test]
    async fn lone_philosopher_eats_every_meal() {
        let journal = RecordingJournal::new();
        let left = Arc::new(Fork::new(1));
        let right = Arc::new(Fork::new(2));
        let host = Arc::new(Host::new(2));
        let philosopher = Philosopher::new(
            1,
            left.clone(),
            right.clone(),
            host.clone(),
            Arc::new(journal.clone()),
            fast_config(3),
        );
        assert_eq!(philosopher.state(), PhilosopherState::Thinking);
        assert_eq!(philosopher.meals_left(), 3);
        assert_eq!(philosopher.forks(), (1, 2));

        let report = philosopher.dine().await.unwrap();

        assert_eq!(report.meals, 3);
        assert_eq!(report.retries, 0);
        assert_eq!(journal.check_meals(1, 3), Ok(()));
        assert_eq!(journal.check_fork_exclusion(), Ok(()));
        assert_eq!(
            journal.lines(),
            vec![
                "starting to eat 1",
                "finishing eating 1",
                "starting to eat 1",
                "finishing eating 1",
                "starting to eat 1",
                "finishing eating 1",
            ]
        );
        assert!(!left.is_held() && !right.is_held());
        assert!(host.admitted().is_empty());
    }

    #[tokio::test]
    async fn backs_off_while_a_neighbour_holds_the_shared_fork() {
        let journal = RecordingJournal::new();
        let left = Arc::new(Fork::new(1));
        let shared = Arc::new(Fork::new(2));
        let host = Arc::new(Host::new(2));
        let philosopher = Philosopher::new(
            1,
            left.clone(),
            shared.clone(),
            host,
            Arc::new(journal.clone()),
            fast_config(1),
        );

        let neighbour = shared.acquire().await.unwrap();
        let dinner = tokio::spawn(philosopher.dine());

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!dinner.is_finished());
        assert!(journal.lines().is_empty());

        neighbour.release();
        let report = tokio::time::timeout(Duration::from_secs(5), dinner)
            .await
            .expect("philosopher never ate")
            .unwrap()
            .unwrap();

        assert_eq!(report.meals, 1);
        assert_eq!(journal.check_fork_exclusion(), Ok(()));
        assert!(!left.is_held() && !shared.is_held());
    }
}
