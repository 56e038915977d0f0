//! Display composer: owns every string on screen and repaints the frame.
//!
//! The watchface holds owned copies of the five text regions (time, date,
//! weekday, battery label, connectivity status) plus the selected gauge
//! polygon, so a repaint never reaches back into the producers. Regions stack
//! top to bottom at the y offsets in [`crate::config`], all centred on
//! [`CENTER_X`](crate::config::CENTER_X).
//!
//! Colour inversion is a whole-frame swap of the two-colour scheme applied at
//! draw time; setting the same inversion state twice is a no-op.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use heapless::String;

use crate::colors;
use crate::config::{
    BATTERY_TEXT_Y, BT_TEXT_Y, CENTER_X, DATE_TEXT_Y, TIME_TEXT_Y, WDAY_TEXT_Y,
};
use crate::connectivity::STATUS_CONNECTED;
use crate::gauge::{self, GaugeReadout, GaugeShape};
use crate::styles::{CENTERED_TOP, LABEL_FONT, TIME_FONT};

// =============================================================================
// Watchface State
// =============================================================================

/// Everything currently visible, as owned data.
pub struct Watchface {
    time_text: String<8>,
    date_text: String<24>,
    wday_text: String<12>,
    battery_text: String<8>,
    bt_text: &'static str,
    /// Selected gauge polygon; `None` until the first battery event, so a
    /// stale gauge is never painted.
    gauge: Option<&'static GaugeShape>,
    /// Whether the battery percent line is drawn. Charging always forces it
    /// back on.
    battery_visible: bool,
    inverted: bool,
}

impl Watchface {
    /// Empty face: no gauge, no text, regular colour scheme. The dispatcher
    /// populates every region during init before the first frame.
    pub const fn new() -> Self {
        Self {
            time_text: String::new(),
            date_text: String::new(),
            wday_text: String::new(),
            battery_text: String::new(),
            bt_text: STATUS_CONNECTED,
            gauge: None,
            battery_visible: true,
            inverted: false,
        }
    }

    /// Replace the time string.
    pub fn set_time(&mut self, text: &str) {
        copy_into(&mut self.time_text, text);
    }

    /// Replace the date string.
    pub fn set_date(&mut self, text: &str) {
        copy_into(&mut self.date_text, text);
    }

    /// Replace the weekday string.
    pub fn set_weekday(&mut self, text: &str) {
        copy_into(&mut self.wday_text, text);
    }

    /// Adopt a gauge selection: both the polygon and its label.
    pub fn set_battery(&mut self, readout: &GaugeReadout) {
        copy_into(&mut self.battery_text, &readout.label);
        self.gauge = Some(readout.shape);
    }

    /// Show or hide the battery percent line.
    #[inline]
    pub fn set_battery_visible(&mut self, visible: bool) {
        self.battery_visible = visible;
    }

    /// Replace the connectivity status line.
    #[inline]
    pub fn set_connectivity(&mut self, text: &'static str) {
        self.bt_text = text;
    }

    /// Apply the invert preference. Idempotent: the scheme is derived from
    /// the flag, never toggled, so repeated identical updates cannot drift.
    #[inline]
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    #[inline]
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    #[cfg(test)]
    pub fn connectivity(&self) -> &'static str {
        self.bt_text
    }

    #[cfg(test)]
    pub fn time(&self) -> &str {
        &self.time_text
    }

    #[cfg(test)]
    pub fn battery_label(&self) -> &str {
        &self.battery_text
    }

    #[cfg(test)]
    pub fn date(&self) -> &str {
        &self.date_text
    }

    #[cfg(test)]
    pub fn weekday(&self) -> &str {
        &self.wday_text
    }

    #[cfg(test)]
    pub fn battery_visible(&self) -> bool {
        self.battery_visible
    }

    /// Repaint the whole frame onto `target`.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let (background, foreground) = colors::scheme(self.inverted);

        target.clear(background)?;

        if let Some(shape) = self.gauge {
            gauge::draw_gauge(target, shape, foreground)?;
        }

        let label_style = MonoTextStyle::new(LABEL_FONT, foreground);
        let time_style = MonoTextStyle::new(TIME_FONT, foreground);

        draw_centered(target, self.bt_text, BT_TEXT_Y, label_style)?;
        if self.battery_visible {
            draw_centered(target, &self.battery_text, BATTERY_TEXT_Y, label_style)?;
        }
        draw_centered(target, &self.time_text, TIME_TEXT_Y, time_style)?;
        draw_centered(target, &self.wday_text, WDAY_TEXT_Y, label_style)?;
        draw_centered(target, &self.date_text, DATE_TEXT_Y, label_style)?;

        Ok(())
    }
}

impl Default for Watchface {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a string into a fixed-capacity region, truncating on overflow. Every
/// producer writes strings shorter than the region capacity, so truncation
/// only guards against future format changes.
fn copy_into<const N: usize>(
    dst: &mut String<N>,
    src: &str,
) {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

/// Draw one horizontally centred text line anchored at its top edge.
fn draw_centered<D>(
    target: &mut D,
    text: &str,
    y: i32,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_text_style(
        text,
        Point::new(CENTER_X, y),
        style,
        CENTERED_TOP,
    )
    .draw(target)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::connectivity::STATUS_NOT_CONNECTED;
    use crate::gauge::{BatteryReading, select_gauge};

    fn new_display() -> SimulatorDisplay<BinaryColor> {
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    /// Whether any pixel in the horizontal band `[y, y + height)` is lit.
    fn band_has_pixels(
        display: &SimulatorDisplay<BinaryColor>,
        y: i32,
        height: i32,
        color: BinaryColor,
    ) -> bool {
        for yy in y..y + height {
            for xx in 0..SCREEN_WIDTH as i32 {
                if display.get_pixel(Point::new(xx, yy)) == color {
                    return true;
                }
            }
        }
        false
    }

    // -------------------------------------------------------------------------
    // Region Layout Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_all_regions_render_in_their_bands() {
        let mut face = Watchface::new();
        face.set_time("12:34");
        face.set_date("30th of August");
        face.set_weekday("Sunday");
        face.set_battery(&select_gauge(BatteryReading {
            charging: false,
            percent: 55,
        }));
        face.set_connectivity(STATUS_NOT_CONNECTED);

        let mut display = new_display();
        face.draw(&mut display).unwrap();

        assert!(
            band_has_pixels(&display, BT_TEXT_Y, 10, BinaryColor::On),
            "Connectivity text should render near the top"
        );
        assert!(
            band_has_pixels(&display, BATTERY_TEXT_Y, 10, BinaryColor::On),
            "Battery label should render below the connectivity line"
        );
        assert!(
            band_has_pixels(&display, TIME_TEXT_Y, 30, BinaryColor::On),
            "Time should render in the large centre region"
        );
        assert!(
            band_has_pixels(&display, WDAY_TEXT_Y, 10, BinaryColor::On),
            "Weekday should render below the time"
        );
        assert!(
            band_has_pixels(&display, DATE_TEXT_Y, 10, BinaryColor::On),
            "Date should render at the bottom"
        );
    }

    #[test]
    fn test_no_gauge_is_painted_before_the_first_battery_event() {
        let face = Watchface::new();
        let mut display = new_display();
        face.draw(&mut display).unwrap();

        // The gauge would put pixels in the top border band at y=2
        assert_eq!(
            display.get_pixel(Point::new(36, 2)),
            BinaryColor::Off,
            "No gauge pixels before the first battery reading"
        );
    }

    #[test]
    fn test_hidden_battery_text_is_not_drawn() {
        let mut face = Watchface::new();
        face.set_battery(&select_gauge(BatteryReading {
            charging: false,
            percent: 55,
        }));
        face.set_battery_visible(false);

        let mut display = new_display();
        face.draw(&mut display).unwrap();
        // The gauge still paints, so restrict the check to the text band
        let mut lit = false;
        for y in BATTERY_TEXT_Y..BATTERY_TEXT_Y + 10 {
            for x in 10..SCREEN_WIDTH as i32 - 10 {
                lit |= display.get_pixel(Point::new(x, y)) == BinaryColor::On;
            }
        }
        assert!(!lit, "Hidden battery text must not be painted");
    }

    // -------------------------------------------------------------------------
    // Inversion Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_inverted_frame_swaps_background() {
        let mut face = Watchface::new();
        face.set_time("12:34");

        let mut display = new_display();
        face.draw(&mut display).unwrap();
        assert_eq!(
            display.get_pixel(Point::new(72, 100)),
            BinaryColor::Off,
            "Regular scheme paints an Off background"
        );

        face.set_inverted(true);
        face.draw(&mut display).unwrap();
        assert_eq!(
            display.get_pixel(Point::new(72, 100)),
            BinaryColor::On,
            "Inverted scheme paints an On background"
        );
        assert!(
            band_has_pixels(&display, TIME_TEXT_Y, 30, BinaryColor::Off),
            "Inverted text is painted in the Off colour"
        );
    }

    #[test]
    fn test_set_inverted_is_idempotent() {
        let mut face = Watchface::new();
        face.set_time("8:01");

        face.set_inverted(true);
        let mut once = new_display();
        face.draw(&mut once).unwrap();

        // Re-applying the same state must not toggle back
        face.set_inverted(true);
        face.set_inverted(true);
        let mut thrice = new_display();
        face.draw(&mut thrice).unwrap();

        for y in 0..SCREEN_HEIGHT as i32 {
            for x in 0..SCREEN_WIDTH as i32 {
                let p = Point::new(x, y);
                assert_eq!(
                    once.get_pixel(p),
                    thrice.get_pixel(p),
                    "Repeated identical inversion must not change the frame"
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Ownership Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_strings_are_copied_not_borrowed() {
        let mut face = Watchface::new();
        {
            let transient = std::string::String::from("11:11");
            face.set_time(&transient);
        }
        // The source is gone; the face still renders its own copy
        let mut display = new_display();
        face.draw(&mut display).unwrap();
        assert!(band_has_pixels(&display, TIME_TEXT_Y, 30, BinaryColor::On));
    }

    #[test]
    fn test_overlong_text_is_truncated_not_panicking() {
        let mut face = Watchface::new();
        face.set_time("123456789012345");
        let mut display = new_display();
        face.draw(&mut display).unwrap();
    }
}
