use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root directory served when no configuration was ever persisted.
pub const DEFAULT_ROOT: &str = "/var/aircat/files";

/// Settings persisted for this unit by the hosting process.
///
/// File format: TOML when loaded standalone, JSON when exchanged over the
/// module boundary. Reconfiguration replaces the document wholesale; there
/// is no partial merge.
///
/// Precedence when loading standalone (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filesystem root all relative playlist/browse paths resolve against.
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ROOT),
        }
    }
}
