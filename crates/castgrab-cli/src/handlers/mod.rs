//! Command handlers.
//!
//! Handlers are thin: they turn parsed arguments into calls on the
//! [`CliContext`](crate::CliContext) and format the result for the terminal.

pub mod download;
pub mod paths;
pub mod plan;
