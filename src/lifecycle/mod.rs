//! # Dinner Lifecycle & Orchestration
//!
//! Individual philosophers are simple; seating them so that neighbours share
//! exactly one fork, launching them together and knowing when the last one
//! has left is where the coordination lives.
//!
//! **Key Responsibilities:**
//! 1. **Seating** - Build N forks, one host and N philosophers in a ring
//! 2. **Launching** - Spawn each philosopher in its own Tokio task
//! 3. **Joining** - Block until every philosopher has eaten all its meals
//! 4. **Observability Setup** - Initialize tracing (see [`setup_tracing`])
//!
//! ## Shutdown
//!
//! There is no shutdown signal. Each philosopher's task ends by itself after
//! its last meal, and [`Table::run`] returns once every task has been joined.
//! After a clean run all forks are free and the host has nobody admitted.

pub mod table;
pub mod tracing;

pub use self::table::*;
pub use self::tracing::*;
