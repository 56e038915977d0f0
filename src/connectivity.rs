//! Bluetooth connectivity status text and haptic gating.
//!
//! The notifier maps the platform's connectivity boolean to a status string
//! and decides whether the long "connection lost" pulse fires. The pulse is
//! gated twice: by the app lifecycle flag (no haptics before the UI is
//! ready) and by the vibrate-on-disconnect preference.
//!
//! Known quirk, preserved deliberately: "disconnected while the vibration
//! preference is disabled" and "disconnected before startup" both fall
//! through to the `"Connected"` text. This has always been the shipped
//! behaviour; see `test_disconnected_without_vibe_shows_connected_quirk`.

/// Status text while the phone link is up (and in the fallthrough cases
/// described in the module docs).
pub const STATUS_CONNECTED: &str = "Connected";

/// Status text while the phone link is down and the pulse fired.
pub const STATUS_NOT_CONNECTED: &str = "NOT Connected";

/// Map a connectivity change to (status text, fire long pulse).
///
/// Pure function; the dispatcher owns the actual haptic call.
pub const fn connection_report(
    started: bool,
    connected: bool,
    vibrate_enabled: bool,
) -> (&'static str, bool) {
    if started && !connected && vibrate_enabled {
        (STATUS_NOT_CONNECTED, true)
    } else {
        (STATUS_CONNECTED, false)
    }
}
