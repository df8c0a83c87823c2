//! Error taxonomy — §7. One variant per row of the error handling table;
//! everything else the core does is infallible by design (the scanner in
//! particular never fails, per §4.I).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("registry file not found: {0}")]
    RegistryMissing(PathBuf),

    #[error("failed to read registry csv: {0}")]
    RegistryIo(#[from] csv::Error),

    #[error("registry csv has no header row")]
    RegistryMissingHeader,

    #[error("registry csv is missing a name/entity_name column")]
    RegistryMissingNameColumn,

    #[error("failed to read cache bundle: {0}")]
    CacheIo(#[from] std::io::Error),
}
