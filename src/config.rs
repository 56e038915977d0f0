//! Application configuration constants.
//!
//! Layout positions mirror the fixed watchface geometry: five stacked text
//! regions centred on a 144×168 monochrome screen, with the battery gauge
//! polygon drawn across the full screen behind them. All positions are
//! `const` so the per-frame drawing code never recomputes coordinates.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (144×168 monochrome smartwatch panel)
pub const SCREEN_WIDTH: u32 = 144;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 168;

/// Screen centre X coordinate. All text regions are centred horizontally.
/// Pre-computed as i32 to avoid casts in drawing code.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

// =============================================================================
// Text Region Layout (top edge of each region, in pixels)
// =============================================================================
//
// Stacking order from the top of the screen:
//   connectivity -> battery percent -> time -> weekday -> date

/// Top edge of the connectivity status line ("Connected" / "NOT Connected").
pub const BT_TEXT_Y: i32 = 5;

/// Top edge of the battery percent line ("87%" / "+87%" while charging).
pub const BATTERY_TEXT_Y: i32 = 20;

/// Top edge of the large time display ("14:05").
pub const TIME_TEXT_Y: i32 = 55;

/// Top edge of the weekday line ("Wednesday").
pub const WDAY_TEXT_Y: i32 = 125;

/// Top edge of the date line ("23rd of September").
pub const DATE_TEXT_Y: i32 = 140;

// =============================================================================
// Gauge Rendering
// =============================================================================

/// Draw the battery gauge polygon as an outline instead of filled.
///
/// This is a build-time choice, not a runtime toggle: the shipped face uses
/// the filled rendering, the outline variant exists for restyling builds.
pub const GAUGE_OUTLINE_MODE: bool = false;

// =============================================================================
// Configuration-Sync Channel
// =============================================================================

/// Size of the inbound configuration-sync buffer in bytes.
/// The companion configuration surface never pushes more than this.
pub const SYNC_BUFFER_LEN: usize = 64;

/// Maximum number of key/value pairs in one configuration-sync message
/// (one per persisted setting).
pub const MAX_SYNC_ENTRIES: usize = 3;

// =============================================================================
// Persistence
// =============================================================================

/// File the host settings store persists the three preference booleans to.
pub const SETTINGS_FILE: &str = "polygauge-settings.bin";

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~20 FPS). A watchface repaints rarely; the main loop
/// sleeps whenever a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(50);
