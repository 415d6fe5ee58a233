//! Intensity → colour mapping.
//!
//! ```text
//! scaled = min(255, intensity * 20)
//! rgb    = (scaled, 255 - scaled, 255 - scaled)
//! ```
//!
//! Zero is cyan `(0, 255, 255)`; from intensity 13 onward every cell is pure
//! red.  The multiply saturates, so no intensity can wrap around.

/// Colour increase per hit.
pub const INTENSITY_STEP: u64 = 20;

/// An 8-bit RGB triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

/// Colour for a cell with `intensity` hits.
pub fn intensity_color(intensity: u64) -> Rgb {
    let scaled = intensity.saturating_mul(INTENSITY_STEP).min(255) as u8;
    Rgb::new(scaled, 255 - scaled, 255 - scaled)
}
