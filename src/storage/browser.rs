//! Browser localStorage backend (WASM only)
//!
//! Talks to the `ir_storage` plugin in `docs/storage.js`. Keys and values
//! cross the boundary as UTF-8 byte ranges in wasm memory. Reads are two-step:
//! ask for the length, then copy into a buffer we own.

use super::StorageError;

extern "C" {
    fn ir_local_storage_available() -> i32;
    fn ir_local_storage_get_len(key_ptr: *const u8, key_len: usize) -> i32;
    fn ir_local_storage_copy(
        key_ptr: *const u8,
        key_len: usize,
        dest_ptr: *mut u8,
        max_len: usize,
    ) -> usize;
    fn ir_local_storage_set(
        key_ptr: *const u8,
        key_len: usize,
        data_ptr: *const u8,
        data_len: usize,
    ) -> i32;
}

/// Length reported for a key that has no value
const SLOT_ABSENT: i32 = -1;

/// Result codes from `ir_local_storage_set`
const SET_OK: i32 = 0;
const SET_QUOTA: i32 = 1;

#[derive(Debug, Clone, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    pub fn describe(&self) -> String {
        "browser localStorage".to_string()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if unsafe { ir_local_storage_available() } == 1 {
            Ok(())
        } else {
            Err(StorageError::Unavailable("localStorage is disabled".into()))
        }
    }

    pub fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;

        let len = unsafe { ir_local_storage_get_len(key.as_ptr(), key.len()) };
        if len == SLOT_ABSENT {
            return Ok(None);
        }
        if len < 0 {
            return Err(StorageError::IoError(format!("localStorage read failed ({})", len)));
        }

        let len = len as usize;
        let mut buf = vec![0u8; len];
        let copied =
            unsafe { ir_local_storage_copy(key.as_ptr(), key.len(), buf.as_mut_ptr(), len) };
        buf.truncate(copied);

        String::from_utf8(buf)
            .map(Some)
            .map_err(|e| StorageError::InvalidData(e.to_string()))
    }

    pub fn write_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        let code = unsafe {
            ir_local_storage_set(key.as_ptr(), key.len(), value.as_ptr(), value.len())
        };
        match code {
            SET_OK => Ok(()),
            SET_QUOTA => Err(StorageError::QuotaExceeded {
                size: value.len() as u64,
            }),
            other => Err(StorageError::IoError(format!("localStorage write failed ({})", other))),
        }
    }
}
