//! Configuration validation
//!
//! Runs the configuration's own checks again at startup and warns about
//! settings that are legal but unsuitable outside development.

use anyhow::Result;
use intake_core::{Config, StoreBackend};

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.store_backend() == StoreBackend::Memory {
        tracing::warn!(
            "STORE_BACKEND=memory keeps imports in process memory; records are lost on restart \
            and duplicates are not detected across instances"
        );
    }

    if config.cors_origins().is_empty() {
        tracing::warn!("CORS_ORIGINS is empty - browser clients will be rejected");
    }

    Ok(())
}
