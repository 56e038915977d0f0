//! Battery gauge: fixed polygon shapes, threshold selector, and rendering.
//!
//! The battery level is not drawn as a bar but as one of eleven pre-drawn
//! closed polygons that trace a progressively longer frame around the screen
//! edge: a thin line at the top for ≤10%, growing clockwise until a full
//! 144×168 border frame at 100%. A distinct named shape exists for the
//! charging state; it shares the full-frame outline.
//!
//! # Selection Policy
//!
//! Deterministic threshold ladder, evaluated in ascending order, first match
//! wins (see [`select_gauge`]):
//!
//! | Condition       | Shape        | Label      |
//! |-----------------|--------------|------------|
//! | charging        | `CHARGING`   | `+{pct}%`  |
//! | pct <= 10       | `BATT_10`    | `{pct}%`   |
//! | pct <= 20 .. 90 | `BATT_20` .. | `{pct}%`   |
//! | pct <= 98       | `BATT_100`   | `{pct}%`   |
//! | pct > 98        | `BATT_100`   | `{pct}%`   |
//!
//! Inputs are pre-validated by the platform (percent is always 0–100), so
//! there are no error paths here.
//!
//! # Rendering
//!
//! All eleven polygons are rectilinear (every edge is axis-parallel), so the
//! even-odd scanline fill below is exact integer math with no rounding.
//! Outline versus filled is a build-time choice via
//! [`GAUGE_OUTLINE_MODE`](crate::config::GAUGE_OUTLINE_MODE).

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
use heapless::String;

use crate::config::GAUGE_OUTLINE_MODE;

// =============================================================================
// Gauge Shape Definitions
// =============================================================================

/// A closed polygon outline for one battery bucket.
///
/// Points describe the closed region in order; the edge from the last point
/// back to the first is implicit. Shapes are immutable and constructed once
/// at compile time.
pub struct GaugeShape {
    /// Bucket name, used only for event logging.
    pub name: &'static str,
    /// Ordered vertices of the closed polygon.
    pub points: &'static [Point],
}

/// ≤10%: short line along the top edge.
pub static BATT_10: GaugeShape = GaugeShape {
    name: "batt10",
    points: &[Point::new(0, 1), Point::new(72, 1), Point::new(72, 3), Point::new(0, 3)],
};

/// ≤20%: full line along the top edge.
pub static BATT_20: GaugeShape = GaugeShape {
    name: "batt20",
    points: &[Point::new(0, 1), Point::new(143, 1), Point::new(143, 3), Point::new(0, 3)],
};

/// ≤30%: top edge plus a third of the right edge.
pub static BATT_30: GaugeShape = GaugeShape {
    name: "batt30",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 56),
        Point::new(140, 56),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// ≤40%: top edge plus two thirds of the right edge.
pub static BATT_40: GaugeShape = GaugeShape {
    name: "batt40",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 112),
        Point::new(140, 112),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// ≤50%: top and right edges.
pub static BATT_50: GaugeShape = GaugeShape {
    name: "batt50",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 166),
        Point::new(140, 166),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// ≤60%: top, right, and half the bottom edge.
pub static BATT_60: GaugeShape = GaugeShape {
    name: "batt60",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 166),
        Point::new(72, 166),
        Point::new(72, 164),
        Point::new(141, 164),
        Point::new(141, 3),
        Point::new(0, 3),
    ],
};

/// ≤70%: top, right, and bottom edges.
pub static BATT_70: GaugeShape = GaugeShape {
    name: "batt70",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 166),
        Point::new(0, 166),
        Point::new(0, 164),
        Point::new(140, 164),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// ≤80%: three edges plus a third of the left edge.
pub static BATT_80: GaugeShape = GaugeShape {
    name: "batt80",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 166),
        Point::new(0, 166),
        Point::new(0, 112),
        Point::new(3, 112),
        Point::new(3, 164),
        Point::new(140, 164),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// ≤90%: three edges plus two thirds of the left edge.
pub static BATT_90: GaugeShape = GaugeShape {
    name: "batt90",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 166),
        Point::new(0, 166),
        Point::new(0, 56),
        Point::new(3, 56),
        Point::new(3, 164),
        Point::new(140, 164),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// >90%: the complete border frame.
pub static BATT_100: GaugeShape = GaugeShape {
    name: "batt100",
    points: &[
        Point::new(0, 1),
        Point::new(143, 1),
        Point::new(143, 166),
        Point::new(0, 166),
        Point::new(0, 3),
        Point::new(3, 3),
        Point::new(3, 164),
        Point::new(140, 164),
        Point::new(140, 3),
        Point::new(0, 3),
    ],
};

/// Charging: shares the full-frame outline but is its own named shape so the
/// charging state stays distinguishable in logs and tests.
pub static CHARGING: GaugeShape = GaugeShape {
    name: "charging",
    points: BATT_100.points,
};

// =============================================================================
// Gauge Selection
// =============================================================================

/// Battery state as delivered by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryReading {
    /// Whether the watch is on the charger.
    pub charging: bool,
    /// Charge percent, 0–100 inclusive (clamped by the platform).
    pub percent: u8,
}

/// Result of a gauge selection: the polygon to draw and the text to show.
pub struct GaugeReadout {
    /// The polygon for the current bucket.
    pub shape: &'static GaugeShape,
    /// Display string: `"{pct}%"`, or `"+{pct}%"` while charging.
    pub label: String<8>,
}

/// Map a battery reading to its gauge polygon and display string.
///
/// Pure function implementing the ascending threshold ladder; while charging
/// the percent buckets are bypassed entirely and the charging shape wins.
pub fn select_gauge(reading: BatteryReading) -> GaugeReadout {
    let mut label: String<8> = String::new();

    if reading.charging {
        let _ = write!(label, "+{}%", reading.percent);
        return GaugeReadout {
            shape: &CHARGING,
            label,
        };
    }

    let _ = write!(label, "{}%", reading.percent);
    let shape = match reading.percent {
        0..=10 => &BATT_10,
        11..=20 => &BATT_20,
        21..=30 => &BATT_30,
        31..=40 => &BATT_40,
        41..=50 => &BATT_50,
        51..=60 => &BATT_60,
        61..=70 => &BATT_70,
        71..=80 => &BATT_80,
        81..=90 => &BATT_90,
        // Both the ≤98 and >98 cases share the full-looking frame
        _ => &BATT_100,
    };

    GaugeReadout { shape, label }
}

// =============================================================================
// Gauge Rendering
// =============================================================================

/// Draw a gauge shape in the configured rendering mode.
pub fn draw_gauge<D>(
    target: &mut D,
    shape: &GaugeShape,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if GAUGE_OUTLINE_MODE {
        draw_outline(target, shape, color)
    } else {
        draw_filled(target, shape, color)
    }
}

/// Stroke every edge of the closed polygon, including the closing edge.
fn draw_outline<D>(
    target: &mut D,
    shape: &GaugeShape,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    let n = shape.points.len();
    for i in 0..n {
        let start = shape.points[i];
        let end = shape.points[(i + 1) % n];
        Line::new(start, end).into_styled(style).draw(target)?;
    }
    Ok(())
}

/// Even-odd scanline fill of the closed polygon.
///
/// For each scanline, collects the x crossings of non-horizontal edges
/// (half-open in y, so shared vertices count once), sorts them, and fills
/// between alternate pairs. Exact for these rectilinear shapes.
fn draw_filled<D>(
    target: &mut D,
    shape: &GaugeShape,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    let n = shape.points.len();

    let y_min = shape.points.iter().map(|p| p.y).min().unwrap_or(0);
    let y_max = shape.points.iter().map(|p| p.y).max().unwrap_or(0);

    for y in y_min..=y_max {
        // Up to one crossing per edge
        let mut crossings: heapless::Vec<i32, 16> = heapless::Vec::new();

        for i in 0..n {
            let a = shape.points[i];
            let b = shape.points[(i + 1) % n];
            if a.y == b.y {
                continue; // horizontal edges never cross a scanline
            }
            let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
            if y >= top.y && y < bottom.y {
                // Edges are vertical, so the crossing x is exact
                let x = top.x + (y - top.y) * (bottom.x - top.x) / (bottom.y - top.y);
                let _ = crossings.push(x);
            }
        }

        crossings.sort_unstable();
        for pair in crossings.chunks(2) {
            if let [x0, x1] = pair {
                Line::new(Point::new(*x0, y), Point::new(*x1, y))
                    .into_styled(style)
                    .draw(target)?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    fn shape_for(percent: u8) -> &'static GaugeShape {
        select_gauge(BatteryReading {
            charging: false,
            percent,
        })
        .shape
    }

    // -------------------------------------------------------------------------
    // Shape Definition Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_all_shapes_are_closed_rectilinear_polygons() {
        let shapes = [
            &BATT_10, &BATT_20, &BATT_30, &BATT_40, &BATT_50, &BATT_60, &BATT_70, &BATT_80,
            &BATT_90, &BATT_100, &CHARGING,
        ];
        for shape in shapes {
            let n = shape.points.len();
            assert!(n >= 4, "{} should have at least 4 vertices", shape.name);
            for i in 0..n {
                let a = shape.points[i];
                let b = shape.points[(i + 1) % n];
                assert!(
                    a.x == b.x || a.y == b.y,
                    "{} edge {}..{} should be axis-parallel",
                    shape.name,
                    i,
                    (i + 1) % n
                );
            }
        }
    }

    #[test]
    fn test_all_shape_points_within_screen() {
        let shapes = [
            &BATT_10, &BATT_20, &BATT_30, &BATT_40, &BATT_50, &BATT_60, &BATT_70, &BATT_80,
            &BATT_90, &BATT_100, &CHARGING,
        ];
        for shape in shapes {
            for p in shape.points {
                assert!(
                    p.x >= 0 && p.x < SCREEN_WIDTH as i32,
                    "{} x={} should be inside the screen",
                    shape.name,
                    p.x
                );
                assert!(
                    p.y >= 0 && p.y < SCREEN_HEIGHT as i32,
                    "{} y={} should be inside the screen",
                    shape.name,
                    p.y
                );
            }
        }
    }

    #[test]
    fn test_charging_shares_full_frame_outline() {
        assert_eq!(
            CHARGING.points, BATT_100.points,
            "Charging shape should trace the full-frame outline"
        );
        assert_ne!(CHARGING.name, BATT_100.name, "Charging keeps its own name");
    }

    // -------------------------------------------------------------------------
    // Threshold Ladder Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_ladder_bucket_boundaries() {
        // First match wins, evaluated in ascending order
        assert!(core::ptr::eq(shape_for(0), &BATT_10), "0% is the 10 bucket");
        assert!(core::ptr::eq(shape_for(10), &BATT_10), "10% is the 10 bucket");
        assert!(core::ptr::eq(shape_for(11), &BATT_20), "11% is the 20 bucket");
        assert!(core::ptr::eq(shape_for(20), &BATT_20), "20% is the 20 bucket");
        assert!(core::ptr::eq(shape_for(30), &BATT_30), "30% is the 30 bucket");
        assert!(core::ptr::eq(shape_for(45), &BATT_50), "45% is the 50 bucket");
        assert!(core::ptr::eq(shape_for(60), &BATT_60), "60% is the 60 bucket");
        assert!(core::ptr::eq(shape_for(70), &BATT_70), "70% is the 70 bucket");
        assert!(core::ptr::eq(shape_for(80), &BATT_80), "80% is the 80 bucket");
        assert!(core::ptr::eq(shape_for(90), &BATT_90), "90% is the 90 bucket");
        assert!(core::ptr::eq(shape_for(91), &BATT_100), "91% is the 100 bucket");
        assert!(core::ptr::eq(shape_for(98), &BATT_100), "98% is the 100 bucket");
    }

    #[test]
    fn test_above_98_shares_full_gauge() {
        // Both >=99 cases deliberately share the full-looking gauge
        assert!(core::ptr::eq(shape_for(99), &BATT_100));
        assert!(core::ptr::eq(shape_for(100), &BATT_100));
    }

    #[test]
    fn test_discharging_label_for_all_percents() {
        for percent in 0..=100u8 {
            let readout = select_gauge(BatteryReading {
                charging: false,
                percent,
            });
            assert_eq!(
                readout.label.as_str(),
                format!("{percent}%"),
                "Discharging label should be bare percent"
            );
        }
    }

    #[test]
    fn test_charging_wins_over_every_bucket() {
        for percent in [0u8, 10, 55, 98, 100] {
            let readout = select_gauge(BatteryReading {
                charging: true,
                percent,
            });
            assert!(
                core::ptr::eq(readout.shape, &CHARGING),
                "Charging at {percent}% should select the charging shape"
            );
            assert_eq!(
                readout.label.as_str(),
                format!("+{percent}%"),
                "Charging label should carry the + prefix"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Rendering Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_filled_full_frame_is_a_ring() {
        let mut display: SimulatorDisplay<BinaryColor> =
            SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        draw_filled(&mut display, &BATT_100, BinaryColor::On).unwrap();

        // On the frame: top border band
        assert_eq!(
            display.get_pixel(Point::new(72, 2)),
            BinaryColor::On,
            "Top border band should be filled"
        );
        // Left border band
        assert_eq!(
            display.get_pixel(Point::new(1, 84)),
            BinaryColor::On,
            "Left border band should be filled"
        );
        // Screen centre is inside the ring's hole, even-odd leaves it empty
        assert_eq!(
            display.get_pixel(Point::new(72, 84)),
            BinaryColor::Off,
            "Frame interior should stay empty"
        );
    }

    #[test]
    fn test_filled_low_bucket_covers_half_the_top_line() {
        let mut display: SimulatorDisplay<BinaryColor> =
            SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        draw_filled(&mut display, &BATT_10, BinaryColor::On).unwrap();

        assert_eq!(
            display.get_pixel(Point::new(36, 2)),
            BinaryColor::On,
            "Left half of the top line should be filled at <=10%"
        );
        assert_eq!(
            display.get_pixel(Point::new(100, 2)),
            BinaryColor::Off,
            "Right half of the top line should stay empty at <=10%"
        );
    }

    #[test]
    fn test_outline_traces_every_edge() {
        let mut display: SimulatorDisplay<BinaryColor> =
            SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        draw_outline(&mut display, &BATT_20, BinaryColor::On).unwrap();

        // All four corners of the thin top-line rectangle
        for p in BATT_20.points {
            assert_eq!(
                display.get_pixel(*p),
                BinaryColor::On,
                "Outline should pass through vertex {p:?}"
            );
        }
        // The closing edge (last vertex back to first) must be drawn too
        assert_eq!(
            display.get_pixel(Point::new(0, 2)),
            BinaryColor::On,
            "Closing edge should be stroked"
        );
    }
}
