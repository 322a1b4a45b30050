//! # Forks
//!
//! A fork is an exclusive-use token shared by the two philosophers seated on
//! either side of it. It is backed by a one-permit [`Semaphore`]: acquiring
//! suspends the task until the permit is free, and the returned
//! [`ForkGuard`] owns the permit until it is released or dropped.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tracing::trace;

use crate::error::{Result, TableError};

/// One fork on the table, identified 1..=N.
pub struct Fork {
    id: usize,
    token: Arc<Semaphore>,
}

impl Fork {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            token: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Waits until the fork is free, then takes it.
    pub async fn acquire(&self) -> Result<ForkGuard> {
        let permit = self
            .token
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| TableError::Closed)?;
        trace!(fork = self.id, "Fork taken");
        Ok(ForkGuard {
            fork: self.id,
            _permit: permit,
        })
    }

    /// Takes the fork only if nobody holds it.
    pub fn try_acquire(&self) -> Result<Option<ForkGuard>> {
        match self.token.clone().try_acquire_owned() {
            Ok(permit) => {
                trace!(fork = self.id, "Fork taken");
                Ok(Some(ForkGuard {
                    fork: self.id,
                    _permit: permit,
                }))
            }
            Err(TryAcquireError::NoPermits) => Ok(None),
            Err(TryAcquireError::Closed) => Err(TableError::Closed),
        }
    }

    pub fn is_held(&self) -> bool {
        self.token.available_permits() == 0
    }
}

impl fmt::Debug for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fork")
            .field("id", &self.id)
            .field("held", &self.is_held())
            .finish()
    }
}

/// Ownership of a fork. The fork becomes free again when the guard is
/// released or dropped.
#[derive(Debug)]
pub struct ForkGuard {
    fork: usize,
    _permit: OwnedSemaphorePermit,
}

impl ForkGuard {
    pub fn fork(&self) -> usize {
        self.fork
    }

    /// Puts the fork back on the table, waking one waiting philosopher.
    pub fn release(self) {
        trace!(fork = self.fork, "Fork put down");
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn second_holder_is_refused() {
        let fork = Fork::new(1);
        let guard = fork.acquire().await.unwrap();
        assert!(fork.is_held());
        assert!(fork.try_acquire().unwrap().is_none());

        guard.release();
        assert!(!fork.is_held());
        assert!(fork.try_acquire().unwrap().is_some());
    }

    #[tokio::test]
    async fn release_wakes_a_waiter() {
        let fork = Arc::new(Fork::new(2));
        let guard = fork.acquire().await.unwrap();

        let waiter = {
            let fork = fork.clone();
            tokio::spawn(async move { fork.acquire().await.map(|g| g.fork()) })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        guard.release();
        let taken = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter never woke")
            .unwrap()
            .unwrap();
        assert_eq!(taken, 2);
        assert!(!fork.is_held());
    }

    #[tokio::test]
    async fn dropping_the_guard_frees_the_fork() {
        let fork = Fork::new(3);
        {
            let _guard = fork.acquire().await.unwrap();
            assert!(fork.is_held());
        }
        assert!(!fork.is_held());
    }
}
