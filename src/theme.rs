//! Visual themes
//!
//! A fixed, ordered cycle of themes and the colour palette each one maps to.

use crate::color_space::Rgb;

/// Visual theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    Vibrant,
}

/// Cycle order used by [`Theme::advance`]
pub const THEMES: [Theme; 3] = [Theme::Classic, Theme::Dark, Theme::Vibrant];

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Dark => "dark",
            Theme::Vibrant => "vibrant",
        }
    }

    /// Next theme in the cycle, wrapping after the last.
    pub fn advance(&self) -> Self {
        let idx = THEMES.iter().position(|t| t == self).unwrap_or(0);
        THEMES[(idx + 1) % THEMES.len()]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        THEMES
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Classic => ThemePalette {
                background: Rgb::new(245, 245, 240),
                foreground: Rgb::new(30, 30, 30),
                accent: Rgb::new(33, 102, 172),
                muted: Rgb::new(120, 120, 120),
                error: Rgb::new(200, 30, 30),
                shirt: Rgb::new(255, 255, 255),
                shirt_outline: Rgb::new(90, 90, 90),
                print_text: Rgb::new(20, 20, 20),
            },
            Theme::Dark => ThemePalette {
                background: Rgb::new(24, 24, 28),
                foreground: Rgb::new(220, 220, 220),
                accent: Rgb::new(130, 170, 255),
                muted: Rgb::new(110, 110, 120),
                error: Rgb::new(255, 100, 100),
                shirt: Rgb::new(45, 45, 52),
                shirt_outline: Rgb::new(150, 150, 160),
                print_text: Rgb::new(240, 240, 240),
            },
            Theme::Vibrant => ThemePalette {
                background: Rgb::new(255, 240, 250),
                foreground: Rgb::new(60, 10, 80),
                accent: Rgb::new(255, 0, 140),
                muted: Rgb::new(150, 90, 170),
                error: Rgb::new(230, 0, 0),
                shirt: Rgb::new(255, 210, 0),
                shirt_outline: Rgb::new(230, 60, 140),
                print_text: Rgb::new(90, 0, 160),
            },
        }
    }
}

/// Colours used to draw the UI and the mockup under a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub accent: Rgb,
    pub muted: Rgb,
    pub error: Rgb,
    pub shirt: Rgb,
    pub shirt_outline: Rgb,
    pub print_text: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_theme_cycle_wraps() {
        let theme = Theme::Classic;
        assert_eq!(theme.advance(), Theme::Dark);
        assert_eq!(theme.advance().advance(), Theme::Vibrant);
        assert_eq!(theme.advance().advance().advance(), Theme::Classic);
    }

    #[test]
    fn test_default_is_classic() {
        assert_eq!(Theme::default(), Theme::Classic);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name(" Vibrant "), Some(Theme::Vibrant));
        assert_eq!(Theme::from_name("neon"), None);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Classic.palette(), Theme::Dark.palette());
        assert_ne!(Theme::Dark.palette(), Theme::Vibrant.palette());
    }

    proptest! {
        #[test]
        fn prop_n_advances_lands_on_n_mod_3(n in 0usize..500) {
            let mut theme = Theme::default();
            for _ in 0..n {
                theme = theme.advance();
            }
            prop_assert_eq!(theme, THEMES[n % 3]);
        }
    }
}
