//! Color palette with light and dark theme support.

use std::sync::{LazyLock, RwLock};

use campusly_core::ThemeMode;
use iced::Color;

/// Complete color palette for the application.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    // Primary brand colors
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    // Surface colors
    pub surface: Color,
    pub surface_elevated: Color,
    pub background: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    // Accent colors
    pub accent_green: Color,
    pub accent_red: Color,

    // State colors
    pub selected: Color,
    pub hover: Color,

    // Border colors
    pub border_subtle: Color,
    pub border_medium: Color,

    // Shadow and scrim
    pub shadow: Color,
    pub scrim: Color,
}

impl Palette {
    /// Creates the light theme palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            // Primary - campus indigo
            primary: Color::from_rgb(0.31, 0.27, 0.90),
            primary_light: Color::from_rgb(0.46, 0.43, 0.97),
            primary_dark: Color::from_rgb(0.22, 0.19, 0.72),

            surface: Color::WHITE,
            surface_elevated: Color::WHITE,
            background: Color::from_rgb(0.97, 0.97, 0.99),

            text_primary: Color::from_rgb(0.07, 0.09, 0.15),
            text_secondary: Color::from_rgb(0.29, 0.33, 0.41),
            text_muted: Color::from_rgb(0.58, 0.62, 0.69),
            text_on_primary: Color::WHITE,

            accent_green: Color::from_rgb(0.09, 0.64, 0.29),
            accent_red: Color::from_rgb(0.86, 0.15, 0.15),

            selected: Color::from_rgb(0.93, 0.93, 1.0),
            hover: Color::from_rgb(0.95, 0.96, 0.98),

            border_subtle: Color::from_rgb(0.90, 0.91, 0.94),
            border_medium: Color::from_rgb(0.82, 0.84, 0.88),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
            scrim: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
        }
    }

    /// Creates the dark theme palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            // Primary - lifted indigo for contrast on dark surfaces
            primary: Color::from_rgb(0.51, 0.55, 0.97),
            primary_light: Color::from_rgb(0.65, 0.68, 0.99),
            primary_dark: Color::from_rgb(0.39, 0.40, 0.95),

            surface: Color::from_rgb(0.12, 0.16, 0.22),
            surface_elevated: Color::from_rgb(0.15, 0.19, 0.26),
            background: Color::from_rgb(0.07, 0.09, 0.15),

            text_primary: Color::from_rgb(0.95, 0.96, 0.97),
            text_secondary: Color::from_rgb(0.82, 0.84, 0.86),
            text_muted: Color::from_rgb(0.61, 0.64, 0.69),
            text_on_primary: Color::from_rgb(0.07, 0.09, 0.15),

            accent_green: Color::from_rgb(0.29, 0.87, 0.50),
            accent_red: Color::from_rgb(0.97, 0.44, 0.44),

            selected: Color::from_rgb(0.19, 0.18, 0.51),
            hover: Color::from_rgb(0.17, 0.21, 0.28),

            border_subtle: Color::from_rgb(0.22, 0.25, 0.32),
            border_medium: Color::from_rgb(0.29, 0.33, 0.41),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
            scrim: Color::from_rgba(0.0, 0.0, 0.0, 0.55),
        }
    }

    /// Gets the palette for a given theme mode.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

/// Current active palette.
static CURRENT: LazyLock<RwLock<Palette>> =
    LazyLock::new(|| RwLock::new(Palette::for_mode(ThemeMode::default())));

/// Sets the current global palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Gets a copy of the current palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT
        .read()
        .map_or_else(|_| Palette::for_mode(ThemeMode::default()), |p| *p)
}
