//! User preferences and the configuration-sync wire format.
//!
//! Three independent booleans are persisted under stable small-integer keys:
//!
//! | Id | Key                     | Effect                                   |
//! |----|-------------------------|------------------------------------------|
//! | 0  | `InvertColors`          | swap the two-colour scheme               |
//! | 1  | `VibrateOnDisconnect`   | long pulse when the phone link drops     |
//! | 2  | `VibrateHourly`         | short pulse on each hour boundary        |
//!
//! A companion configuration surface pushes updates over an inbound byte
//! buffer (≤64 bytes) holding up to three key/i32 pairs, postcard-encoded.
//! Any nonzero integer means true. Unknown keys are ignored; malformed
//! buffers are reported as [`SyncError`] and dropped by the dispatcher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_SYNC_ENTRIES;
use crate::platform::SettingsStore;

// =============================================================================
// Setting Keys
// =============================================================================

/// The three persisted preference keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingKey {
    /// Swap background and text colours across the whole face.
    InvertColors,
    /// Long haptic pulse when Bluetooth connectivity is lost.
    VibrateOnDisconnect,
    /// Short haptic pulse on every hour boundary.
    VibrateHourly,
}

impl SettingKey {
    /// All keys, in storage-id order.
    pub const ALL: [SettingKey; 3] = [
        SettingKey::InvertColors,
        SettingKey::VibrateOnDisconnect,
        SettingKey::VibrateHourly,
    ];

    /// Stable storage identifier for this key.
    #[inline]
    pub const fn id(self) -> u8 {
        match self {
            SettingKey::InvertColors => 0,
            SettingKey::VibrateOnDisconnect => 1,
            SettingKey::VibrateHourly => 2,
        }
    }

    /// Resolve a raw sync/storage id; unknown ids yield `None` and are
    /// ignored by the caller.
    #[inline]
    pub const fn from_id(id: u8) -> Option<SettingKey> {
        match id {
            0 => Some(SettingKey::InvertColors),
            1 => Some(SettingKey::VibrateOnDisconnect),
            2 => Some(SettingKey::VibrateHourly),
            _ => None,
        }
    }
}

// =============================================================================
// In-Memory Preferences
// =============================================================================

/// The three preference booleans currently in effect.
///
/// Kept write-through equal to the persistent store: every sync mutation is
/// persisted immediately, and store failures leave the in-memory value
/// authoritative for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub invert_colors: bool,
    pub vibrate_on_disconnect: bool,
    pub vibrate_hourly: bool,
}

impl Preferences {
    /// Read all three keys from the store, defaulting to false for keys that
    /// were never written.
    pub fn load(store: &impl SettingsStore) -> Self {
        Self {
            invert_colors: store.read(SettingKey::InvertColors),
            vibrate_on_disconnect: store.read(SettingKey::VibrateOnDisconnect),
            vibrate_hourly: store.read(SettingKey::VibrateHourly),
        }
    }

    /// Current value of one key.
    #[inline]
    pub const fn get(self, key: SettingKey) -> bool {
        match key {
            SettingKey::InvertColors => self.invert_colors,
            SettingKey::VibrateOnDisconnect => self.vibrate_on_disconnect,
            SettingKey::VibrateHourly => self.vibrate_hourly,
        }
    }

    /// Set one key in memory. Persisting is the caller's job (write-through
    /// happens in the dispatcher so failures can be logged in one place).
    #[inline]
    pub const fn set(
        &mut self,
        key: SettingKey,
        value: bool,
    ) {
        match key {
            SettingKey::InvertColors => self.invert_colors = value,
            SettingKey::VibrateOnDisconnect => self.vibrate_on_disconnect = value,
            SettingKey::VibrateHourly => self.vibrate_hourly = value,
        }
    }
}

// =============================================================================
// Configuration-Sync Wire Format
// =============================================================================

/// One key/value pair in a sync message. The value is an integer on the
/// wire; any nonzero value is treated as boolean true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEntry {
    pub key: u8,
    pub value: i32,
}

impl SyncEntry {
    /// Boolean interpretation of the wire value.
    #[inline]
    pub const fn enabled(self) -> bool {
        self.value != 0
    }
}

/// A configuration-sync message: up to one entry per persisted setting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMessage {
    pub entries: heapless::Vec<SyncEntry, MAX_SYNC_ENTRIES>,
}

/// Failure decoding an inbound sync buffer.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("malformed sync payload: {0}")]
    Malformed(#[from] postcard::Error),
}

/// Decode an inbound configuration-sync buffer.
pub fn decode_sync(buf: &[u8]) -> Result<SyncMessage, SyncError> {
    Ok(postcard::from_bytes(buf)?)
}

/// Encode a sync message into the provided buffer, returning the used slice.
/// The host uses this to simulate pushes from the configuration surface.
pub fn encode_sync<'a>(
    msg: &SyncMessage,
    buf: &'a mut [u8],
) -> Result<&'a mut [u8], SyncError> {
    Ok(postcard::to_slice(msg, buf)?)
}

// =============================================================================
// Unit Tests
// =============================================================================
