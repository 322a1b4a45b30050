//! # The Host
//!
//! The host is the admission gate in front of the dining state. It is a
//! passive counting gate rather than an active task: a [`Semaphore`] with
//! `capacity` permits bounds how many philosophers eat at once, and a small
//! ledger records who is currently admitted and the most diners ever seen
//! together.
//!
//! ## Admission Lifecycle
//!
//! 1. A philosopher holding both forks calls [`Host::request_permission`].
//! 2. The call suspends until a seat is free (waiters are served in FIFO
//!    order, so nobody waits forever while seats keep turning over).
//! 3. The returned [`Admission`] is the right to eat. Handing it back through
//!    [`Host::release_permission`] (or dropping it) frees the seat.
//!
//! Since an `Admission` is consumed on release, a philosopher cannot give
//! back the same seat twice.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use crate::error::{Result, TableError};

#[derive(Debug, Default)]
struct Ledger {
    admitted: BTreeSet<usize>,
    high_water: usize,
}

type SharedLedger = Arc<Mutex<Ledger>>;

fn lock(ledger: &SharedLedger) -> MutexGuard<'_, Ledger> {
    // The ledger holds plain bookkeeping; a panic elsewhere cannot leave it torn.
    ledger.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bounds the number of philosophers eating at the same time.
#[derive(Debug)]
pub struct Host {
    capacity: usize,
    seats: Arc<Semaphore>,
    ledger: SharedLedger,
}

impl Host {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seats: Arc::new(Semaphore::new(capacity)),
            ledger: SharedLedger::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Waits for a free seat and admits `philosopher` to eat.
    pub async fn request_permission(&self, philosopher: usize) -> Result<Admission> {
        let permit = self
            .seats
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| TableError::Closed)?;

        let mut ledger = lock(&self.ledger);
        ledger.admitted.insert(philosopher);
        ledger.high_water = ledger.high_water.max(ledger.admitted.len());
        trace!(philosopher, eating = ledger.admitted.len(), "Admitted");
        drop(ledger);

        Ok(Admission {
            philosopher,
            ledger: self.ledger.clone(),
            _permit: permit,
        })
    }

    /// Returns a seat to the host, waking one waiting philosopher if any.
    pub fn release_permission(&self, admission: Admission) {
        debug_assert!(Arc::ptr_eq(&self.ledger, &admission.ledger));
        drop(admission);
    }

    /// Philosophers currently admitted, in id order.
    pub fn admitted(&self) -> Vec<usize> {
        lock(&self.ledger).admitted.iter().copied().collect()
    }

    /// Largest number of philosophers ever admitted at the same time.
    pub fn high_water_mark(&self) -> usize {
        lock(&self.ledger).high_water
    }
}

/// A granted seat at the host. Frees the seat when released or dropped.
#[derive(Debug)]
pub struct Admission {
    philosopher: usize,
    ledger: SharedLedger,
    _permit: OwnedSemaphorePermit,
}

impl Admission {
    pub fn philosopher(&self) -> usize {
        self.philosopher
    }
}

impl Drop for Admission {
    // Runs before the permit field is dropped, so the ledger never shows more
    // diners than there are seats.
    fn drop(&mut self) {
        let mut ledger = lock(&self.ledger);
        ledger.admitted.remove(&self.philosopher);
        trace!(
            philosopher = self.philosopher,
            eating = ledger.admitted.len(),
            "Released seat"
        );
    }
}
