//! Configuration loading for claimquery.

mod settings;

pub use settings::*;
