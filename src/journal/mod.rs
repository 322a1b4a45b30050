//! # Dining Journal
//!
//! Philosophers report every state change that matters to the outside world
//! through a [`Journal`]. Two implementations ship with the crate:
//!
//! - [`LineJournal`] writes the eating lines (`starting to eat <n>`,
//!   `finishing eating <n>`) to a shared writer, stdout in production.
//! - [`RecordingJournal`](recording::RecordingJournal) keeps a sequenced,
//!   in-memory log of every event so tests can check mutual exclusion, the
//!   host's capacity and the meal count after a run.
//!
//! Events are recorded at the points where they are already true: a fork is
//! reported picked up only once it is held, and reported put down before it
//! is released. Any interval read off the journal is therefore contained in
//! the real one.

pub mod recording;

use std::fmt;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use crate::error::Result;

pub use recording::RecordingJournal;

/// Something a philosopher did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiningEvent {
    PickedUpFork { philosopher: usize, fork: usize },
    PutDownFork { philosopher: usize, fork: usize },
    StartedEating { philosopher: usize, meal: u32 },
    FinishedEating { philosopher: usize, meal: u32 },
    Done { philosopher: usize },
}

impl DiningEvent {
    pub fn philosopher(&self) -> usize {
        match *self {
            DiningEvent::PickedUpFork { philosopher, .. }
            | DiningEvent::PutDownFork { philosopher, .. }
            | DiningEvent::StartedEating { philosopher, .. }
            | DiningEvent::FinishedEating { philosopher, .. }
            | DiningEvent::Done { philosopher } => philosopher,
        }
    }

    /// Whether the event produces one of the two required output lines.
    pub fn is_eating_line(&self) -> bool {
        matches!(
            self,
            DiningEvent::StartedEating { .. } | DiningEvent::FinishedEating { .. }
        )
    }
}

impl fmt::Display for DiningEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiningEvent::PickedUpFork { philosopher, fork } => {
                write!(f, "Philosopher #{philosopher} picked up fork {fork}")
            }
            DiningEvent::PutDownFork { philosopher, fork } => {
                write!(f, "Philosopher #{philosopher} dropped fork {fork}")
            }
            DiningEvent::StartedEating { philosopher, .. } => {
                write!(f, "starting to eat {philosopher}")
            }
            DiningEvent::FinishedEating { philosopher, .. } => {
                write!(f, "finishing eating {philosopher}")
            }
            DiningEvent::Done { philosopher } => {
                write!(f, "Philosopher #{philosopher} is done")
            }
        }
    }
}

/// Destination for dining events.
///
/// A failed write is returned to the philosopher, which stops dining and
/// hands the error to the table.
#[async_trait]
pub trait Journal: Send + Sync {
    async fn record(&self, event: DiningEvent) -> Result<()>;
}

/// Writes the eating lines, one per line, to a shared writer.
///
/// The writer sits behind an async mutex so lines from different
/// philosophers never interleave. Fork and completion events are not written;
/// philosophers trace those at debug level.
pub struct LineJournal<W> {
    out: Mutex<W>,
}

impl LineJournal<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> LineJournal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W> Journal for LineJournal<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn record(&self, event: DiningEvent) -> Result<()> {
        if !event.is_eating_line() {
            return Ok(());
        }
        let line = format!("{event}\n");
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eating_lines_have_the_required_wording() {
        let start = DiningEvent::StartedEating {
            philosopher: 4,
            meal: 1,
        };
        let finish = DiningEvent::FinishedEating {
            philosopher: 4,
            meal: 1,
        };
        assert_eq!(start.to_string(), "starting to eat 4");
        assert_eq!(finish.to_string(), "finishing eating 4");
        assert!(start.is_eating_line() && finish.is_eating_line());
        assert!(!DiningEvent::Done { philosopher: 4 }.is_eating_line());
    }

    #[tokio::test]
    async fn line_journal_writes_only_eating_lines() {
        let journal = LineJournal::new(Vec::new());
        let events = [
            DiningEvent::PickedUpFork {
                philosopher: 2,
                fork: 2,
            },
            DiningEvent::PickedUpFork {
                philosopher: 2,
                fork: 3,
            },
            DiningEvent::StartedEating {
                philosopher: 2,
                meal: 1,
            },
            DiningEvent::FinishedEating {
                philosopher: 2,
                meal: 1,
            },
            DiningEvent::PutDownFork {
                philosopher: 2,
                fork: 3,
            },
            DiningEvent::Done { philosopher: 2 },
        ];
        for event in events {
            journal.record(event).await.unwrap();
        }

        let written = String::from_utf8(journal.into_inner()).unwrap();
        assert_eq!(written, "starting to eat 2\nfinishing eating 2\n");
    }
}
