//! Event dispatcher: the single owning application context.
//!
//! One [`App`] value owns the platform capabilities, the preferences, the
//! clock text cache and the watchface, and routes every platform event to
//! the right component. The platform is injected through the
//! [`SettingsStore`] and [`Haptics`] traits, so the same dispatcher runs
//! under the simulator host and under the unit tests.
//!
//! # Lifecycle
//!
//! Construction loads the persisted preferences and populates every display
//! region from the initial readings, then flips the `started` flag. Haptic
//! effects are suppressed until that flag is set, so restoring persisted
//! state never buzzes the wrist. Everything is released by `Drop` order.
//!
//! # Error Policy
//!
//! Event handling never fails outward. Malformed sync payloads and store
//! write failures are logged and dropped; the in-memory preference value
//! stays authoritative for the session either way.

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use log::{debug, warn};

use crate::clock::{ClockText, TimeUnits};
use crate::connectivity::connection_report;
use crate::gauge::{BatteryReading, select_gauge};
use crate::platform::{Haptics, SettingsStore};
use crate::settings::{Preferences, SettingKey, decode_sync};
use crate::watchface::Watchface;

// =============================================================================
// Events
// =============================================================================

/// A platform event, as delivered by the host loop.
#[derive(Debug)]
pub enum Event<'a> {
    /// A minute tick, with the units that rolled over since the last tick.
    Tick {
        now: NaiveDateTime,
        units: TimeUnits,
    },
    /// Battery state changed.
    Battery(BatteryReading),
    /// Bluetooth connectivity changed.
    Bluetooth { connected: bool },
    /// An inbound configuration-sync buffer.
    Sync(&'a [u8]),
}

/// Initial platform readings sampled once at startup.
#[derive(Clone, Copy, Debug)]
pub struct InitialState {
    pub now: NaiveDateTime,
    pub use_24h: bool,
    pub battery: BatteryReading,
    pub connected: bool,
}

// =============================================================================
// Application Context
// =============================================================================

/// The single application context.
pub struct App<S, H>
where
    S: SettingsStore,
    H: Haptics,
{
    store: S,
    haptics: H,
    prefs: Preferences,
    clock: ClockText,
    face: Watchface,
    use_24h: bool,
    /// Set once initial population is complete; gates all haptics.
    started: bool,
}

impl<S, H> App<S, H>
where
    S: SettingsStore,
    H: Haptics,
{
    /// Build the context: load preferences, populate every region from the
    /// initial readings, then arm the haptics.
    pub fn init(
        store: S,
        haptics: H,
        initial: InitialState,
    ) -> Self {
        let prefs = Preferences::load(&store);
        debug!("Loaded preferences: {prefs:?}");

        let mut app = Self {
            store,
            haptics,
            prefs,
            clock: ClockText::new(),
            face: Watchface::new(),
            use_24h: initial.use_24h,
            started: false,
        };

        app.face.set_inverted(app.prefs.invert_colors);
        app.refresh_clock(initial.now);
        app.handle_event(Event::Battery(initial.battery));
        app.handle_event(Event::Bluetooth {
            connected: initial.connected,
        });

        app.started = true;
        app
    }

    /// Route one platform event.
    pub fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Tick { now, units } => self.on_tick(now, units),
            Event::Battery(reading) => self.on_battery(reading),
            Event::Bluetooth { connected } => self.on_bluetooth(connected),
            Event::Sync(buf) => self.on_sync(buf),
        }
    }

    /// Defensive refresh: recompute time and date with a possibly changed
    /// hour format and re-derive the connectivity line from the current
    /// platform state. Date and weekday are reused unless the day rolled
    /// over.
    pub fn force_refresh(
        &mut self,
        now: NaiveDateTime,
        use_24h: bool,
        connected: bool,
    ) {
        self.use_24h = use_24h;
        self.refresh_clock(now);
        self.on_bluetooth(connected);
    }

    /// Repaint the current frame.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.face.draw(target)
    }

    // -------------------------------------------------------------------------
    // Event Handlers
    // -------------------------------------------------------------------------

    fn on_tick(
        &mut self,
        now: NaiveDateTime,
        units: TimeUnits,
    ) {
        self.refresh_clock(now);

        if units.contains(TimeUnits::HOUR) && self.started && self.prefs.vibrate_hourly {
            debug!("Hour boundary, firing hourly pulse");
            self.haptics.short_pulse();
        }
    }

    fn on_battery(&mut self, reading: BatteryReading) {
        let readout = select_gauge(reading);
        debug!(
            "Battery {}%, charging={}, gauge={}",
            reading.percent, reading.charging, readout.shape.name
        );
        self.face.set_battery(&readout);
        if reading.charging {
            // Plugging in always brings the percent text back
            self.face.set_battery_visible(true);
        }
    }

    fn on_bluetooth(&mut self, connected: bool) {
        let (text, pulse) = connection_report(
            self.started,
            connected,
            self.prefs.vibrate_on_disconnect,
        );
        debug!("Bluetooth connected={connected}, showing '{text}'");
        self.face.set_connectivity(text);
        if pulse {
            self.haptics.long_pulse();
        }
    }

    fn on_sync(&mut self, buf: &[u8]) {
        let msg = match decode_sync(buf) {
            Ok(msg) => msg,
            Err(err) => {
                warn!("Dropping sync payload: {err}");
                return;
            }
        };

        for entry in &msg.entries {
            let Some(key) = SettingKey::from_id(entry.key) else {
                debug!("Ignoring unknown sync key {}", entry.key);
                continue;
            };
            self.apply_setting(key, entry.enabled());
        }
    }

    /// Adopt one preference value: update memory, persist, apply the visible
    /// side effect. A store failure keeps the in-memory value for the
    /// session.
    fn apply_setting(
        &mut self,
        key: SettingKey,
        value: bool,
    ) {
        self.prefs.set(key, value);
        if let Err(err) = self.store.write(key, value) {
            warn!("Could not persist {key:?}={value}: {err}");
        }

        if key == SettingKey::InvertColors {
            self.face.set_inverted(value);
        }
        // The vibration preferences take effect on the next matching event
    }

    fn refresh_clock(&mut self, now: NaiveDateTime) {
        self.clock.update(now, self.use_24h);
        self.face.set_time(self.clock.time());
        self.face.set_date(self.clock.date());
        self.face.set_weekday(self.clock.weekday());
    }

    /// Preferences currently in effect. The host uses this to build toggle
    /// messages for the simulated configuration surface.
    #[inline]
    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    #[cfg(test)]
    fn face(&self) -> &Watchface {
        &self.face
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
