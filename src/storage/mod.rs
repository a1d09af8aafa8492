//! Scene slot store
//!
//! Named text slots with one backend per platform:
//! - Native: one file per slot under the user data directory
//! - WASM: the browser's `localStorage`, reached through a JS plugin
//!
//! Both backends finish before returning, so every call is a plain `Result`.

#[cfg(not(target_arch = "wasm32"))]
pub mod local;
#[cfg(target_arch = "wasm32")]
pub mod browser;

#[cfg(target_arch = "wasm32")]
use browser::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
use local::LocalStorage;
use std::fmt;

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Slot or directory not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// I/O error
    IoError(String),
    /// Backend not available (e.g. browser storage disabled)
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Unavailable(String),
    /// Browser refused the write
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    QuotaExceeded { size: u64 },
    /// Slot key is empty or contains path separators
    InvalidKey(String),
    /// Stored bytes are not valid UTF-8
    InvalidData(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(path) => write!(f, "not found: {}", path),
            StorageError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StorageError::QuotaExceeded { size } => {
                write!(f, "quota exceeded while writing {} bytes", size)
            }
            StorageError::InvalidKey(key) => write!(f, "invalid slot key: {:?}", key),
            StorageError::InvalidData(msg) => write!(f, "invalid data: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

/// Reject keys that could escape the slot directory
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.starts_with('.');
    if bad {
        Err(StorageError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Storage - platform backend selection
// ─────────────────────────────────────────────────────────────────────────────

/// Key/value slot storage for the current platform
#[derive(Debug)]
pub struct Storage {
    #[cfg(not(target_arch = "wasm32"))]
    backend: LocalStorage,
    #[cfg(target_arch = "wasm32")]
    backend: BrowserStorage,
}

impl Storage {
    /// Create the platform default storage
    ///
    /// Native: `<data_dir>/invisible-runner/`, or the working directory when
    /// the platform has no data directory.
    pub fn new() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let base = dirs::data_dir()
                .map(|dir| dir.join("invisible-runner"))
                .unwrap_or_else(|| std::path::PathBuf::from("."));
            Self {
                backend: LocalStorage::with_base_dir(base),
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                backend: BrowserStorage::new(),
            }
        }
    }

    /// Native storage rooted at a specific directory (tests, portable installs)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_base_dir(base_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            backend: LocalStorage::with_base_dir(base_dir),
        }
    }

    /// Human-readable location, for the startup log
    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Read a slot; `None` when the slot was never written
    pub fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        self.backend.read_slot(key)
    }

    /// Overwrite a slot
    pub fn write_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.backend.write_slot(key, value)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
