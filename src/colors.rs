//! Colour scheme for the monochrome watchface.
//!
//! The face has exactly two colours, background and text/gauge, with a
//! global invert preference that swaps them wholesale. There is no
//! user-configurable palette beyond that swap.

use embedded_graphics::pixelcolor::BinaryColor;

/// Normal background colour (black on the panel).
pub const BACKGROUND: BinaryColor = BinaryColor::Off;

/// Normal text and gauge colour (white on the panel).
pub const FOREGROUND: BinaryColor = BinaryColor::On;

/// Resolve the (background, foreground) pair for the given invert state.
///
/// Inversion is a full swap of the two-colour scheme, equivalent to laying
/// a full-screen inversion overlay over the face.
#[inline]
pub const fn scheme(inverted: bool) -> (BinaryColor, BinaryColor) {
    if inverted {
        (FOREGROUND, BACKGROUND)
    } else {
        (BACKGROUND, FOREGROUND)
    }
}
