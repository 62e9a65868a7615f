//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.

pub mod cache;
pub mod convert;
pub mod copy;
pub mod dispatcher;

pub use dispatcher::{Command, CommandDispatcher};
