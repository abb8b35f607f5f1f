//! Display theme: background and color-scheme flags.
//!
//! The two flags are resolved into a [`Palette`] on every render; the
//! palette is never cached across theme changes.

use hires_filter::{Palette, PaletteError, Rgb};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

const VIOLET: Rgb = Rgb::new(168, 85, 247);
const APPLE_GREEN: Rgb = Rgb::new(0, 255, 65);

/// Background flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundTheme {
    #[default]
    Dark,
    Light,
}

impl BackgroundTheme {
    pub fn color(self) -> Rgb {
        match self {
            BackgroundTheme::Dark => Rgb::BLACK,
            BackgroundTheme::Light => Rgb::WHITE,
        }
    }
}

/// Foreground color-scheme flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Violet,
    Apple,
}

impl ColorScheme {
    pub fn color(self) -> Rgb {
        match self {
            ColorScheme::Violet => VIOLET,
            ColorScheme::Apple => APPLE_GREEN,
        }
    }
}

/// The pair of theme flags a render is requested with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ThemeSettings {
    pub background: BackgroundTheme,
    pub color: ColorScheme,
}

impl ThemeSettings {
    pub fn new(background: BackgroundTheme, color: ColorScheme) -> Self {
        Self { background, color }
    }

    /// Resolve the flags into a stylization palette.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        Palette::new(self.background.color(), self.color.color())
    }

    /// CSS custom properties for a client rendering the same theme.
    pub fn css_variables(&self) -> BTreeMap<String, String> {
        let text = self.color.color().to_hex();
        BTreeMap::from([
            ("--bg-color".to_string(), self.background.color().to_hex()),
            ("--text-color".to_string(), text.clone()),
            ("--theme-color-violet".to_string(), text.clone()),
            ("--theme-color-apple-green".to_string(), text),
        ])
    }
}
