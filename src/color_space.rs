//! Terminal colour handling
//!
//! Theme and image colours are plain RGB. Before they reach the screen they
//! are quantized once to a [`TermColor`] for the detected colour level, which
//! can then be written as an ANSI escape or handed to Ratatui.

use ratatui::style::Color;

use crate::terminal_capabilities::ColorSupport;

/// RGB color type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared euclidean distance, good enough for nearest-palette lookup
    fn distance(&self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2) as u32;
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// xterm's default 16-colour palette
const PALETTE_16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(229, 229, 229),
    Rgb::new(127, 127, 127),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(92, 92, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Channel levels of the 6x6x6 cube (indices 16-231)
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// A colour reduced to what the terminal can display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermColor {
    /// Index into the 16-colour palette
    Basic(u8),
    /// Index into the 256-colour palette
    Indexed(u8),
    True(Rgb),
}

impl TermColor {
    /// Quantize for a colour level. `None` when colour is disabled.
    pub fn quantize(rgb: Rgb, support: ColorSupport) -> Option<Self> {
        match support {
            ColorSupport::NoColor => None,
            ColorSupport::Color16 => Some(TermColor::Basic(nearest_ansi16(rgb))),
            ColorSupport::Color256 => Some(TermColor::Indexed(nearest_ansi256(rgb))),
            ColorSupport::TrueColor => Some(TermColor::True(rgb)),
        }
    }

    pub fn fg_sequence(&self) -> String {
        match *self {
            TermColor::Basic(c) if c < 8 => format!("\x1b[{}m", 30 + c),
            TermColor::Basic(c) => format!("\x1b[{}m", 90 + (c - 8)),
            TermColor::Indexed(c) => format!("\x1b[38;5;{}m", c),
            TermColor::True(rgb) => format!("\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b),
        }
    }

    pub fn bg_sequence(&self) -> String {
        match *self {
            TermColor::Basic(c) if c < 8 => format!("\x1b[{}m", 40 + c),
            TermColor::Basic(c) => format!("\x1b[{}m", 100 + (c - 8)),
            TermColor::Indexed(c) => format!("\x1b[48;5;{}m", c),
            TermColor::True(rgb) => format!("\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b),
        }
    }
}

impl From<TermColor> for Color {
    fn from(color: TermColor) -> Self {
        match color {
            TermColor::Basic(c) | TermColor::Indexed(c) => Color::Indexed(c),
            TermColor::True(rgb) => Color::Rgb(rgb.r, rgb.g, rgb.b),
        }
    }
}

/// Closest entry of the 16-colour palette
pub fn nearest_ansi16(rgb: Rgb) -> u8 {
    PALETTE_16
        .iter()
        .enumerate()
        .min_by_key(|(_, candidate)| rgb.distance(**candidate))
        .map(|(index, _)| index as u8)
        .unwrap_or(0)
}

/// Closest entry of the 256-colour palette, from the cube or the grey ramp
pub fn nearest_ansi256(rgb: Rgb) -> u8 {
    let level = |v: u8| -> usize {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            _ => ((v as usize - 35) / 40).min(5),
        }
    };
    let (ri, gi, bi) = (level(rgb.r), level(rgb.g), level(rgb.b));
    let cube = Rgb::new(CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
    let cube_index = (16 + 36 * ri + 6 * gi + bi) as u8;

    // Grey ramp 232-255 covers 8..=238 in steps of 10
    let avg = (rgb.r as u32 + rgb.g as u32 + rgb.b as u32) / 3;
    let grey_step = ((avg.saturating_sub(3)) / 10).min(23) as u8;
    let grey_level = 8 + 10 * grey_step;
    let grey = Rgb::new(grey_level, grey_level, grey_level);

    if rgb.distance(grey) < rgb.distance(cube) {
        232 + grey_step
    } else {
        cube_index
    }
}

/// Foreground escape for a colour, empty when colour is disabled
pub fn fg_sequence(rgb: Rgb, support: ColorSupport) -> String {
    TermColor::quantize(rgb, support)
        .map(|c| c.fg_sequence())
        .unwrap_or_default()
}

/// Background escape for a colour, empty when colour is disabled
pub fn bg_sequence(rgb: Rgb, support: ColorSupport) -> String {
    TermColor::quantize(rgb, support)
        .map(|c| c.bg_sequence())
        .unwrap_or_default()
}

/// Map a colour to the closest Ratatui colour the terminal can show.
///
/// Returns `None` when colour output is disabled.
pub fn to_terminal_color(rgb: Rgb, support: ColorSupport) -> Option<Color> {
    TermColor::quantize(rgb, support).map(Color::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi16_exact_matches() {
        assert_eq!(nearest_ansi16(Rgb::new(0, 0, 0)), 0);
        assert_eq!(nearest_ansi16(Rgb::new(255, 255, 255)), 15);
        assert_eq!(nearest_ansi16(Rgb::new(255, 0, 0)), 9);
        assert_eq!(nearest_ansi16(Rgb::new(200, 30, 30)), 1);
    }

    #[test]
    fn test_ansi256_prefers_grey_ramp_for_greys() {
        let code = nearest_ansi256(Rgb::new(128, 128, 128));
        assert!((232..=255).contains(&code));
    }

    #[test]
    fn test_ansi256_cube_for_saturated() {
        assert_eq!(nearest_ansi256(Rgb::new(255, 0, 0)), 196);
        assert_eq!(nearest_ansi256(Rgb::new(0, 0, 255)), 21);
    }

    #[test]
    fn test_escape_sequences() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(fg_sequence(red, ColorSupport::TrueColor), "\x1b[38;2;255;0;0m");
        assert_eq!(bg_sequence(red, ColorSupport::Color256), "\x1b[48;5;196m");
        assert_eq!(fg_sequence(red, ColorSupport::Color16), "\x1b[91m");
        assert_eq!(fg_sequence(Rgb::new(205, 0, 0), ColorSupport::Color16), "\x1b[31m");
        assert_eq!(fg_sequence(red, ColorSupport::NoColor), "");
    }

    #[test]
    fn test_terminal_color_mapping() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(
            to_terminal_color(red, ColorSupport::TrueColor),
            Some(Color::Rgb(255, 0, 0))
        );
        assert_eq!(to_terminal_color(red, ColorSupport::NoColor), None);
        assert_eq!(
            to_terminal_color(red, ColorSupport::Color256),
            Some(Color::Indexed(196))
        );
    }
}
