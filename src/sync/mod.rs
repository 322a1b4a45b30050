//! Shared resources on the table: the forks and the host.

pub mod fork;
pub mod host;

pub use fork::{Fork, ForkGuard};
pub use host::{Admission, Host};
