//! # Observability & Tracing
//!
//! Stdout belongs to the eating lines, so diagnostics go to **stderr**
//! through a compact `tracing_subscriber` formatter. Verbosity is controlled
//! with `RUST_LOG`:
//!
//! ```bash
//! # Only the eating lines
//! cargo run
//!
//! # Dinner start/finish and each philosopher leaving
//! RUST_LOG=info cargo run
//!
//! # Fork pick-ups, drops, back-offs and meal durations
//! RUST_LOG=debug cargo run
//!
//! # Host seat bookkeeping as well
//! RUST_LOG=trace cargo run
//! ```
//!
//! Every philosopher runs inside a `philosopher{id=N}` span, so a debug line
//! reads like:
//!
//! ```text
//! DEBUG philosopher: Picked up fork id=3 fork=4
//! ```

/// Initializes the tracing subscriber once for the whole process.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false) // Spans carry the philosopher id; module paths add nothing
        .compact()
        .init();
}
