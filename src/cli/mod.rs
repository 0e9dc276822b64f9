//! CLI module for the claimquery command-line interface.
//!
//! Command handlers load the configured claim records and run questions
//! through the query pipelines.

mod commands;
mod output;

pub use commands::*;
