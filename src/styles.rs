//! Pre-computed text styles to avoid per-frame object construction.
//!
//! `TextStyle` is `const`-constructible in embedded-graphics 0.8, so the
//! alignment style lives in the binary's read-only data. The invert
//! preference makes every text colour dynamic, so the fonts are exposed for
//! `MonoTextStyle::new(FONT, colour)` at draw time: only the colour varies,
//! the font reference is shared.

use embedded_graphics::{
    mono_font::{MonoFont, ascii::FONT_6X10},
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centred text anchored at the top edge of its region. Every watchface
/// region is laid out by its top-left y coordinate, so all text uses this.
pub const CENTERED_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font References (for dynamic colour styles)
// =============================================================================

/// Large time font (`ProFont` 24pt), the largest numeric face available in
/// the font stack.
pub const TIME_FONT: &MonoFont = &PROFONT_24_POINT;

/// Small label font (6x10 pixels) for the date, weekday, battery and
/// connectivity lines.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;
