//! Terminal capability detection
//!
//! Detects color support and terminal size.

use crossterm::terminal;
use serde::{Deserialize, Serialize};
use std::env;

/// Level of color support in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSupport {
    #[serde(rename = "none", alias = "nocolor")]
    NoColor,
    #[serde(rename = "16")]
    Color16,
    #[serde(rename = "256")]
    Color256,
    /// Full 24-bit RGB
    #[default]
    #[serde(rename = "truecolor")]
    TrueColor,
}

impl ColorSupport {
    /// Name as written in the config file
    pub fn name(&self) -> &'static str {
        match self {
            ColorSupport::NoColor => "none",
            ColorSupport::Color16 => "16",
            ColorSupport::Color256 => "256",
            ColorSupport::TrueColor => "truecolor",
        }
    }
}

/// Terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_support: ColorSupport,
    pub size: (u16, u16),
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            color_support: ColorSupport::TrueColor,
            size: (80, 24),
        }
    }
}

/// Detect terminal capabilities
///
/// A configured colour level wins over detection.
pub fn detect_capabilities(color_override: Option<ColorSupport>) -> TerminalCapabilities {
    let color_support = color_override.unwrap_or_else(detect_color_support);
    let size = terminal::size().unwrap_or((80, 24));

    TerminalCapabilities {
        color_support,
        size,
    }
}

/// Detect the level of color support from the process environment
pub fn detect_color_support() -> ColorSupport {
    color_support_from(&ColorEnv {
        no_color: env::var_os("NO_COLOR").is_some(),
        colorterm: env::var("COLORTERM").ok(),
        term: env::var("TERM").ok(),
        windows_terminal: env::var_os("WT_SESSION").is_some(),
    })
}

/// Environment values that decide the colour level
#[derive(Debug, Clone, Default)]
pub struct ColorEnv {
    pub no_color: bool,
    pub colorterm: Option<String>,
    pub term: Option<String>,
    pub windows_terminal: bool,
}

pub fn color_support_from(vars: &ColorEnv) -> ColorSupport {
    if vars.no_color {
        return ColorSupport::NoColor;
    }

    let colorterm = vars.colorterm.as_deref().unwrap_or("").to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::TrueColor;
    }

    if let Some(term) = vars.term.as_deref().map(str::to_lowercase) {
        match term.as_str() {
            "dumb" => return ColorSupport::NoColor,
            "linux" | "vt100" | "ansi" => return ColorSupport::Color16,
            _ => {}
        }
        if term.contains("256") || term.starts_with("screen") || term.starts_with("tmux") {
            return ColorSupport::Color256;
        }
        if term.starts_with("xterm") || term.starts_with("rxvt") {
            return ColorSupport::Color16;
        }
    }

    if vars.windows_terminal {
        return ColorSupport::TrueColor;
    }

    ColorSupport::Color256
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str) -> ColorEnv {
        ColorEnv {
            term: Some(name.to_string()),
            ..ColorEnv::default()
        }
    }

    #[test]
    fn test_capabilities_default() {
        let caps = TerminalCapabilities::default();
        assert_eq!(caps.color_support, ColorSupport::TrueColor);
        assert_eq!(caps.size, (80, 24));
    }

    #[test]
    fn test_override_wins() {
        let caps = detect_capabilities(Some(ColorSupport::Color16));
        assert_eq!(caps.color_support, ColorSupport::Color16);
    }

    #[test]
    fn test_no_color_beats_everything() {
        let vars = ColorEnv {
            no_color: true,
            colorterm: Some("truecolor".to_string()),
            ..term("xterm-256color")
        };
        assert_eq!(color_support_from(&vars), ColorSupport::NoColor);
    }

    #[test]
    fn test_term_detection() {
        assert_eq!(color_support_from(&term("dumb")), ColorSupport::NoColor);
        assert_eq!(color_support_from(&term("linux")), ColorSupport::Color16);
        assert_eq!(color_support_from(&term("xterm")), ColorSupport::Color16);
        assert_eq!(color_support_from(&term("xterm-256color")), ColorSupport::Color256);
        assert_eq!(color_support_from(&term("screen")), ColorSupport::Color256);

        let vars = ColorEnv {
            colorterm: Some("24bit".to_string()),
            ..term("xterm")
        };
        assert_eq!(color_support_from(&vars), ColorSupport::TrueColor);
    }

    #[test]
    fn test_color_support_names_in_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: ColorSupport,
        }
        for support in [
            ColorSupport::NoColor,
            ColorSupport::Color16,
            ColorSupport::Color256,
            ColorSupport::TrueColor,
        ] {
            let parsed: Wrapper = toml::from_str(&format!("color = \"{}\"", support.name())).unwrap();
            assert_eq!(parsed.color, support);
        }
        let parsed: Wrapper = toml::from_str("color = \"nocolor\"").unwrap();
        assert_eq!(parsed.color, ColorSupport::NoColor);
        assert!(toml::from_str::<Wrapper>("color = \"TrueColor\"").is_err());
    }
}
