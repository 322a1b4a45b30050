//! # Dining Host
//!
//! > **The dining philosophers, with a host at the door.**
//!
//! Five philosophers sit around a table with one fork between each pair of
//! neighbours. To eat, a philosopher needs both adjacent forks *and* a seat
//! from the host, who lets at most two philosophers eat at the same time.
//! Every philosopher eats three meals and then leaves; the program ends when
//! the table is empty.
//!
//! Each time a philosopher starts eating it prints `starting to eat <n>`, and
//! just before it puts anything back it prints `finishing eating <n>`.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Shared Resources ([`sync`])
//! - [`Fork`](sync::Fork): an exclusive token backed by a one-permit semaphore.
//! - [`Host`](sync::Host): a counting gate that bounds concurrent diners.
//!
//! ### 2. The Actors ([`philosopher`])
//! Each [`Philosopher`](philosopher::Philosopher) runs in its own Tokio task
//! and walks the Thinking → Hungry → AwaitingHost → Eating cycle.
//!
//! ### 3. The Output ([`journal`])
//! Philosophers report what they do to a [`Journal`](journal::Journal):
//! stdout lines in production, a sequenced in-memory log in tests.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`Table`](lifecycle::Table) seats everyone in a ring, runs the dinner and
//! returns a [`DinnerSummary`](lifecycle::DinnerSummary).
//!
//! ## Deadlock
//!
//! Philosophers pick up their forks in a random order each meal. On its own
//! that still allows the circular wait of the classic problem, so the second
//! fork is only *tried*: if it is busy, the first goes back on the table and
//! the philosopher retries after a random back-off.
//!
//! ## 🚀 Running
//!
//! ```bash
//! # Eating lines on stdout only
//! cargo run
//!
//! # With diagnostics on stderr
//! RUST_LOG=debug cargo run
//! ```

pub mod config;
pub mod error;
pub mod journal;
pub mod lifecycle;
pub mod philosopher;
pub mod sync;

pub use error::{Result, TableError};
