use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::journal::Journal;
use crate::philosopher::{MealReport, Philosopher};
use crate::sync::{Fork, Host};

/// The dinner orchestrator.
///
/// `Table` is responsible for:
/// - **Seating**: building the forks and philosophers and wiring them into a ring
/// - **Launching**: starting every philosopher in its own Tokio task
/// - **Joining**: waiting until every philosopher has eaten all its meals
///
/// # Ring Topology
///
/// Philosopher `p` (1-based) sits between fork `p` on its left and fork
/// `p % N + 1` on its right, so neighbours share exactly one fork and the last
/// philosopher shares fork 1 with the first.
///
/// # Example
///
/// ```ignore
/// let table = Table::new(TableConfig::default(), Arc::new(LineJournal::stdout()))?;
/// let summary = table.run().await?;
/// assert_eq!(summary.meals_eaten(), 15);
/// ```
pub struct Table {
    config: Arc<TableConfig>,
    forks: Vec<Arc<Fork>>,
    host: Arc<Host>,
    philosophers: Vec<Philosopher>,
}

impl Table {
    /// Validates `config` and seats everyone. Nothing runs until [`Table::run`].
    pub fn new(config: TableConfig, journal: Arc<dyn Journal>) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let n = config.philosophers;

        let forks: Vec<Arc<Fork>> = (1..=n).map(|id| Arc::new(Fork::new(id))).collect();
        let host = Arc::new(Host::new(config.capacity));

        let philosophers = (0..n)
            .map(|i| {
                Philosopher::new(
                    i + 1,
                    forks[i].clone(),
                    forks[(i + 1) % n].clone(),
                    host.clone(),
                    journal.clone(),
                    config.clone(),
                )
            })
            .collect();

        Ok(Self {
            config,
            forks,
            host,
            philosophers,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Shared handles to the forks, in id order. They stay valid after the run.
    pub fn forks(&self) -> &[Arc<Fork>] {
        &self.forks
    }

    pub fn host(&self) -> Arc<Host> {
        self.host.clone()
    }

    pub fn philosophers(&self) -> &[Philosopher] {
        &self.philosophers
    }

    /// Runs the dinner to completion.
    ///
    /// Every philosopher is spawned before any is awaited, so they all compete
    /// for forks at once. The first failure (a journal write error or a
    /// panicked task) is returned after the remaining tasks have been joined.
    pub async fn run(self) -> Result<DinnerSummary> {
        info!(
            philosophers = self.config.philosophers,
            meals = self.config.meals,
            capacity = self.config.capacity,
            "Dinner started"
        );

        let handles: Vec<JoinHandle<Result<MealReport>>> = self
            .philosophers
            .into_iter()
            .map(|philosopher| tokio::spawn(philosopher.dine()))
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        let mut failure = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => {
                    error!(error = %e, "Philosopher stopped dining");
                    failure = failure.or(Some(e));
                }
                Err(e) => {
                    error!(error = %e, "Philosopher task failed");
                    failure = failure.or(Some(TableError::from(e)));
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let summary = DinnerSummary {
            reports,
            host_high_water: self.host.high_water_mark(),
            forks_in_use: self
                .forks
                .iter()
                .filter(|fork| fork.is_held())
                .map(|fork| fork.id())
                .collect(),
        };
        info!(
            meals = summary.meals_eaten(),
            retries = summary.retries(),
            most_diners = summary.host_high_water,
            "Dinner finished"
        );
        Ok(summary)
    }
}

/// Outcome of a completed dinner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DinnerSummary {
    /// One report per philosopher, in seating order.
    pub reports: Vec<MealReport>,
    /// Most philosophers the host ever admitted at once.
    pub host_high_water: usize,
    /// Forks still held when the last philosopher left; empty after a clean run.
    pub forks_in_use: Vec<usize>,
}

impl DinnerSummary {
    pub fn meals_eaten(&self) -> u32 {
        self.reports.iter().map(|r| r.meals).sum()
    }

    pub fn retries(&self) -> u32 {
        self.reports.iter().map(|r| r.retries).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::RecordingJournal;
    use std::time::Duration;

    #[test]
    fn seats_philosophers_in_a_ring() {
        let table = Table::new(TableConfig::default(), Arc::new(RecordingJournal::new())).unwrap();
        let seating: Vec<(usize, (usize, usize))> = table
            .philosophers()
            .iter()
            .map(|p| (p.id(), p.forks()))
            .collect();
        assert_eq!(
            seating,
            vec![(1, (1, 2)), (2, (2, 3)), (3, (3, 4)), (4, (4, 5)), (5, (5, 1))]
        );
        assert_eq!(table.forks().len(), 5);
        assert_eq!(table.config().meals, 3);
        assert_eq!(table.host().capacity(), 2);
        assert!(table.philosophers().iter().all(|p| p.meals_left() == 3));
    }

    #[test]
    fn refuses_an_invalid_config() {
        let config = TableConfig {
            meals: 0,
            ..TableConfig::default()
        };
        let result = Table::new(config, Arc::new(RecordingJournal::new()));
        assert!(matches!(result, Err(TableError::InvalidConfig(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 5)]
    async fn small_dinner_runs_to_completion() {
        let journal = RecordingJournal::new();
        let config = TableConfig {
            philosophers: 3,
            meals: 2,
            capacity: 1,
            ..TableConfig::default().with_time_unit(Duration::from_millis(1))
        };
        let table = Table::new(config, Arc::new(journal.clone())).unwrap();
        let host = table.host();

        let summary = table.run().await.unwrap();

        assert_eq!(summary.meals_eaten(), 6);
        assert_eq!(summary.host_high_water, 1);
        assert!(summary.forks_in_use.is_empty());
        assert!(host.admitted().is_empty());
        assert_eq!(journal.check_meals(3, 2), Ok(()));
        assert_eq!(journal.max_concurrent_eaters(), 1);
    }
}
