#![allow(clippy::struct_excessive_bools)] // Preferences and host state are genuinely three independent flags

//! Polygon battery-gauge watchface, simulator host.
//!
//! A 144×168 monochrome watchface: large time readout, date with ordinal
//! suffix, weekday, Bluetooth status, and a battery gauge drawn as one of
//! eleven fixed polygons that wrap progressively further around the screen
//! edge as charge increases.
//!
//! The application core ([`app::App`]) is platform-agnostic and driven
//! entirely by events. This binary is the host: it runs the SDL window,
//! samples the wall clock once a frame, turns keyboard input into the
//! platform events a watch would deliver, and persists the three user
//! preferences to a small file between runs.
//!
//! # Controls (Simulator Mode)
//!
//! | Key     | Simulated event                                  |
//! |---------|--------------------------------------------------|
//! | `B`     | Toggle Bluetooth connectivity                    |
//! | `C`     | Toggle charger plugged/unplugged                 |
//! | `Up`    | Battery +10%                                     |
//! | `Down`  | Battery -10%                                     |
//! | `I`     | Push invert-colors toggle over the sync channel  |
//! | `V`     | Push vibrate-on-disconnect toggle over sync      |
//! | `H`     | Push vibrate-hourly toggle over sync             |
//! | `R`     | Re-read the hour format and refresh the face     |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.
//!
//! Set `WATCHFACE_24H=0` to run in 12-hour mode (combine with `R` to switch
//! at runtime). Logging follows `RUST_LOG`, default `info`.
//!
//! # Layout
//!
//! ```text
//! ┌─────────────────────────┐
//! │       Connected         │   y=5
//! │          80%            │   y=20
//! │                         │
//! │        10:42            │   y=55  (large font)
//! │                         │
//! │        Sunday           │   y=125
//! │     30th of August      │   y=140
//! └─────────────────────────┘
//!   gauge polygon hugs the screen border
//! ```

mod app;
mod clock;
mod colors;
mod config;
mod connectivity;
mod gauge;
mod platform;
mod settings;
mod styles;
mod watchface;

use std::thread;
use std::time::Instant;

use app::{App, Event, InitialState};
use chrono::{Local, NaiveDateTime, Timelike};
use clock::units_between;
use config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH, SETTINGS_FILE, SYNC_BUFFER_LEN};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use gauge::BatteryReading;
use log::{error, info};
use platform::{FileSettingsStore, LogHaptics};
use settings::{SettingKey, SyncEntry, SyncMessage, encode_sync};

/// Whether the host locale prefers 24-hour time. Re-read on `R`.
fn use_24h_style() -> bool {
    std::env::var("WATCHFACE_24H").map_or(true, |v| v != "0")
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Push one preference toggle through the real sync channel: encode a
/// single-entry message into the 64-byte buffer and hand it to the
/// dispatcher, exactly as a companion configuration page would.
fn push_sync_toggle(
    app: &mut App<FileSettingsStore, LogHaptics>,
    key: SettingKey,
) {
    let current = app.preferences().get(key);
    let mut msg = SyncMessage::default();
    let entry = SyncEntry {
        key: key.id(),
        value: i32::from(!current),
    };
    if msg.entries.push(entry).is_err() {
        return;
    }

    let mut buf = [0u8; SYNC_BUFFER_LEN];
    match encode_sync(&msg, &mut buf) {
        Ok(used) => {
            info!("Sync push: {key:?} -> {}", !current);
            app.handle_event(Event::Sync(used));
        }
        Err(err) => error!("Could not encode sync toggle: {err}"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Initialize display and window (simulator mode)
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new()
        .theme(BinaryColorTheme::OledWhite)
        .scale(2)
        .build();
    let mut window = Window::new("Polygon Gauge Watchface", &output_settings);

    // ==========================================================================
    // Simulated Platform State
    // ==========================================================================

    // Battery and connectivity as the keyboard drives them
    let mut connected = true;
    let mut charging = false;
    let mut percent: u8 = 70;

    let mut last_tick = now_local();

    let store = FileSettingsStore::open(SETTINGS_FILE);
    let mut app = App::init(
        store,
        LogHaptics,
        InitialState {
            now: last_tick,
            use_24h: use_24h_style(),
            battery: BatteryReading { charging, percent },
            connected,
        },
    );

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::B => {
                            connected = !connected;
                            info!("Bluetooth {}", if connected { "connected" } else { "lost" });
                            app.handle_event(Event::Bluetooth { connected });
                        }
                        Keycode::C => {
                            charging = !charging;
                            app.handle_event(Event::Battery(BatteryReading { charging, percent }));
                        }
                        Keycode::Up => {
                            percent = (percent + 10).min(100);
                            app.handle_event(Event::Battery(BatteryReading { charging, percent }));
                        }
                        Keycode::Down => {
                            percent = percent.saturating_sub(10);
                            app.handle_event(Event::Battery(BatteryReading { charging, percent }));
                        }
                        Keycode::I => push_sync_toggle(&mut app, SettingKey::InvertColors),
                        Keycode::V => push_sync_toggle(&mut app, SettingKey::VibrateOnDisconnect),
                        Keycode::H => push_sync_toggle(&mut app, SettingKey::VibrateHourly),
                        Keycode::R => {
                            info!("Force refresh ({})", if use_24h_style() { "24h" } else { "12h" });
                            app.force_refresh(now_local(), use_24h_style(), connected);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // A watch delivers one tick per minute; sample the wall clock each
        // frame and dispatch when the minute rolls over
        let now = now_local();
        if now.minute() != last_tick.minute() || now.date() != last_tick.date() {
            app.handle_event(Event::Tick {
                now,
                units: units_between(last_tick, now),
            });
            last_tick = now;
        }

        if let Err(err) = app.draw(&mut display) {
            error!("Frame draw failed: {err:?}");
        }
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
