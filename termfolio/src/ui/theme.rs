//! Color palettes
//!
//! Palettes are immutable tables picked by [`ThemeId`]. The dispatcher owns the
//! active id; screens read the palette from `AppState` at render time.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

/// One of the built-in color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    /// Solarized-dark "warrior" scheme
    #[default]
    Default,
    Hacker,
    Dracula,
    Space,
    Digimon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub help: Color,
    pub error: Color,
    pub success: Color,
}

const WARRIOR: Palette = Palette {
    background: Color::Rgb(0x0f, 0x0f, 0x0f),
    primary: Color::Rgb(0xdc, 0x32, 0x2f),
    secondary: Color::Rgb(0x93, 0xa1, 0xa1),
    accent: Color::Rgb(0x2a, 0xa1, 0x98),
    help: Color::Rgb(0x58, 0x6e, 0x75),
    error: Color::Rgb(0xb5, 0x89, 0x00),
    success: Color::Rgb(0x00, 0xff, 0x00),
};

const HACKER: Palette = Palette {
    background: Color::Rgb(0x0f, 0x0f, 0x0f),
    primary: Color::Rgb(0x00, 0xff, 0x00),
    secondary: Color::Rgb(0x00, 0x77, 0x00),
    accent: Color::Rgb(0x33, 0xff, 0x99),
    help: Color::Rgb(0x62, 0x62, 0x62),
    error: Color::Rgb(0xff, 0x00, 0x00),
    success: Color::Rgb(0x33, 0xff, 0x99),
};

const DRACULA: Palette = Palette {
    background: Color::Rgb(0x28, 0x2a, 0x36),
    primary: Color::Rgb(0xff, 0x79, 0xc6),
    secondary: Color::Rgb(0x62, 0x72, 0xa4),
    accent: Color::Rgb(0x8b, 0xe9, 0xfd),
    help: Color::Rgb(0x62, 0x62, 0x62),
    error: Color::Rgb(0xff, 0x00, 0x00),
    success: Color::Rgb(0x50, 0xfa, 0x7b),
};

const SPACE: Palette = Palette {
    background: Color::Rgb(0x0a, 0x0e, 0x27),
    primary: Color::Rgb(0xff, 0xff, 0xff),
    secondary: Color::Rgb(0x7c, 0x8f, 0xb5),
    accent: Color::Rgb(0x9d, 0x7c, 0xff),
    help: Color::Rgb(0x4a, 0x55, 0x68),
    error: Color::Rgb(0xff, 0x6b, 0x9d),
    success: Color::Rgb(0x00, 0xff, 0x00),
};

const DIGIMON: Palette = Palette {
    error: Color::Rgb(0xff, 0x5c, 0x5c),
    ..SPACE
};

impl ThemeId {
    /// Order shown in the theme picker
    pub const ALL: [ThemeId; 5] = [
        ThemeId::Default,
        ThemeId::Hacker,
        ThemeId::Dracula,
        ThemeId::Space,
        ThemeId::Digimon,
    ];

    /// Stable name used on the command line and in the theme file
    pub fn name(self) -> &'static str {
        match self {
            ThemeId::Default => "default",
            ThemeId::Hacker => "hacker",
            ThemeId::Dracula => "dracula",
            ThemeId::Space => "space",
            ThemeId::Digimon => "digimon",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ThemeId::Default => "Solarized Dark",
            ThemeId::Hacker => "Matrix Hacker",
            ThemeId::Dracula => "Dracula",
            ThemeId::Space => "Deep Space",
            ThemeId::Digimon => "Digital World",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeId::Default => "🌙",
            ThemeId::Hacker => "💻",
            ThemeId::Dracula => "🧛",
            ThemeId::Space => "🚀",
            ThemeId::Digimon => "🥚",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ThemeId::Default => "Classic solarized dark theme - Easy on the eyes",
            ThemeId::Hacker => "Green terminal vibes - Enter the Matrix",
            ThemeId::Dracula => "Dark with vibrant accents - Modern & Stylish",
            ThemeId::Space => "Midnight blues with a violet glow",
            ThemeId::Digimon => "Space palette with a warmer alarm red",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeId::Default => &WARRIOR,
            ThemeId::Hacker => &HACKER,
            ThemeId::Dracula => &DRACULA,
            ThemeId::Space => &SPACE,
            ThemeId::Digimon => &DIGIMON,
        }
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "warrior" => Ok(ThemeId::Default),
            "hacker" => Ok(ThemeId::Hacker),
            "dracula" => Ok(ThemeId::Dracula),
            "space" => Ok(ThemeId::Space),
            "digimon" => Ok(ThemeId::Digimon),
            _ => Err(format!(
                "Unknown theme: '{}'. Valid options: default, hacker, dracula, space, digimon",
                s
            )),
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const GOLD: Color = Color::Rgb(0xff, 0xd7, 0x00);

/// GitHub linguist color for a language name
pub fn language_color(language: &str) -> Color {
    match language {
        "Go" => Color::Rgb(0x00, 0xad, 0xd8),
        "Python" => Color::Rgb(0x35, 0x72, 0xa5),
        "JavaScript" => Color::Rgb(0xf7, 0xdf, 0x1e),
        "TypeScript" => Color::Rgb(0x31, 0x78, 0xc6),
        "Rust" => Color::Rgb(0xde, 0xa5, 0x84),
        "Ruby" => Color::Rgb(0xcc, 0x34, 0x2d),
        "Java" => Color::Rgb(0xb0, 0x72, 0x19),
        "C++" => Color::Rgb(0xf3, 0x4b, 0x7d),
        "C" => Color::Rgb(0x55, 0x55, 0x55),
        "C#" => Color::Rgb(0x23, 0x91, 0x20),
        "PHP" => Color::Rgb(0x4f, 0x5d, 0x95),
        "Swift" => Color::Rgb(0xfa, 0x73, 0x43),
        "Kotlin" => Color::Rgb(0xa9, 0x7b, 0xff),
        "Dart" => Color::Rgb(0x00, 0xb4, 0xab),
        "HTML" => Color::Rgb(0xe3, 0x4c, 0x26),
        "CSS" => Color::Rgb(0x15, 0x72, 0xb6),
        "Shell" => Color::Rgb(0x89, 0xe0, 0x51),
        "Lua" => Color::Rgb(0x00, 0x00, 0x80),
        "Vue" => Color::Rgb(0x41, 0xb8, 0x83),
        "Svelte" => Color::Rgb(0xff, 0x3e, 0x00),
        _ => Color::Rgb(0x85, 0x85, 0x85),
    }
}
