//! Command-line adapter for castgrab.
//!
//! `main.rs` is the composition root; everything it wires together lives
//! here so it can be unit tested.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, RequestArgs};
pub use error::CliError;
pub use logging::init_tracing;
pub use parser::Cli;
