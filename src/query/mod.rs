//! Natural language claims queries.
//!
//! This module provides:
//! - Intent classification for ranking and aggregation questions
//! - Field resolution and request building
//! - Formatting of backend results into prose
//! - A pipeline executor tying the stages to a backend

pub mod builder;
pub mod classifier;
pub mod executor;
pub mod formatter;
pub mod resolver;
pub mod types;

pub use builder::*;
pub use classifier::*;
pub use executor::*;
pub use formatter::*;
pub use resolver::*;
pub use types::*;
