//! Platform capability seams: persistent settings storage and haptics.
//!
//! The application core only ever talks to the [`SettingsStore`] and
//! [`Haptics`] traits, so the same dispatcher runs against the host
//! implementations here and against the in-memory doubles used by the unit
//! tests. The host store persists the three preference booleans to a small
//! postcard file next to the binary.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use thiserror::Error;

use crate::settings::SettingKey;

// =============================================================================
// Errors
// =============================================================================

/// Failure persisting settings to the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file encoding failed: {0}")]
    Codec(#[from] postcard::Error),
}

// =============================================================================
// Capability Traits
// =============================================================================

/// Persistent key/boolean storage for the user preferences.
///
/// Reads are infallible: a key that was never written (or whose backing file
/// is unreadable) reads as false. Write failures surface to the dispatcher,
/// which logs them and keeps the in-memory value for the session.
pub trait SettingsStore {
    /// Current persisted value of a key; false if never written.
    fn read(&self, key: SettingKey) -> bool;

    /// Persist one key.
    fn write(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), StoreError>;
}

/// Vibration motor abstraction.
pub trait Haptics {
    /// One short pulse (hourly chime).
    fn short_pulse(&mut self);

    /// One long pulse (connection lost).
    fn long_pulse(&mut self);
}

// =============================================================================
// Host Implementations
// =============================================================================

/// File-backed settings store: the three booleans postcard-encoded as a
/// fixed `[bool; 3]`, indexed by [`SettingKey::id`].
pub struct FileSettingsStore {
    path: PathBuf,
    values: [bool; 3],
}

impl FileSettingsStore {
    /// Open the store, loading any previously persisted values. A missing or
    /// unreadable file is not an error: every key starts as false.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => match postcard::from_bytes::<[bool; 3]>(&bytes) {
                Ok(values) => {
                    info!("Loaded settings from {}: {values:?}", path.display());
                    values
                }
                Err(err) => {
                    warn!("Ignoring corrupt settings file {}: {err}", path.display());
                    [false; 3]
                }
            },
            Err(_) => {
                info!("No settings file at {}, starting with defaults", path.display());
                [false; 3]
            }
        };
        Self { path, values }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let mut buf = [0u8; 8];
        let used = postcard::to_slice(&self.values, &mut buf)?;
        fs::write(&self.path, &*used)?;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    #[inline]
    fn read(&self, key: SettingKey) -> bool {
        self.values[key.id() as usize]
    }

    fn write(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), StoreError> {
        self.values[key.id() as usize] = value;
        self.persist()
    }
}

/// Host haptics: the simulator has no motor, so pulses land in the log where
/// the event timing is still visible.
#[derive(Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn short_pulse(&mut self) {
        info!("Haptics: short pulse");
    }

    fn long_pulse(&mut self) {
        info!("Haptics: long pulse");
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

/// In-memory store for unit tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: [bool; 3],
    /// Number of successful writes, to assert on write-through behaviour.
    pub writes: u32,
    /// When set, every write fails with an I/O error.
    pub fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    /// Store pre-seeded with (invert, vibrate-on-disconnect, vibrate-hourly).
    pub fn with_values(
        invert: bool,
        disconnect: bool,
        hourly: bool,
    ) -> Self {
        Self {
            values: [invert, disconnect, hourly],
            writes: 0,
            fail_writes: false,
        }
    }
}

#[cfg(test)]
impl SettingsStore for MemoryStore {
    fn read(&self, key: SettingKey) -> bool {
        self.values[key.id() as usize]
    }

    fn write(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::other("store offline")));
        }
        self.values[key.id() as usize] = value;
        self.writes += 1;
        Ok(())
    }
}

/// Haptics double that counts pulses.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingHaptics {
    pub short_pulses: u32,
    pub long_pulses: u32,
}

#[cfg(test)]
impl Haptics for RecordingHaptics {
    fn short_pulse(&mut self) {
        self.short_pulses += 1;
    }

    fn long_pulse(&mut self) {
        self.long_pulses += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join("polygauge-store-roundtrip");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("settings.bin");
        let _ = fs::remove_file(&path);

        {
            let mut store = FileSettingsStore::open(&path);
            assert!(!store.read(SettingKey::InvertColors), "Fresh store reads false");
            store.write(SettingKey::InvertColors, true).unwrap();
            store.write(SettingKey::VibrateHourly, true).unwrap();
        }

        // A new store instance sees the persisted values
        let store = FileSettingsStore::open(&path);
        assert!(store.read(SettingKey::InvertColors));
        assert!(!store.read(SettingKey::VibrateOnDisconnect));
        assert!(store.read(SettingKey::VibrateHourly));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_survives_corrupt_file() {
        let dir = std::env::temp_dir().join("polygauge-store-corrupt");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("settings.bin");
        fs::write(&path, [0xFFu8; 32]).unwrap();

        let store = FileSettingsStore::open(&path);
        for key in SettingKey::ALL {
            assert!(!store.read(key), "Corrupt file falls back to defaults");
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_memory_store_failure_mode() {
        let mut store = MemoryStore::default();
        store.fail_writes = true;
        assert!(store.write(SettingKey::InvertColors, true).is_err());
        assert!(!store.read(SettingKey::InvertColors), "Failed write leaves store unchanged");
    }
}
