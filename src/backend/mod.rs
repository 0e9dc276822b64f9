//! Query backends.
//!
//! The pipelines only depend on the [`QueryBackend`] trait. `MemoryBackend`
//! executes queries over claim records loaded from a local file.

mod filter;
mod memory;
mod traits;

pub use filter::RecordFilter;
pub use memory::{load_records, MemoryBackend};
pub use traits::*;

use std::sync::Arc;

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Create a backend from configuration.
pub async fn create_backend(config: &Config) -> Result<Arc<dyn QueryBackend>> {
    let path = config
        .records_path()
        .ok_or_else(|| ConfigError::MissingField("data.records_path".to_string()))?;
    let backend = MemoryBackend::from_file(&path, config.backend.clone()).await?;
    Ok(Arc::new(backend))
}
