//! Color palette with light and dark theme support.
//!
//! Views read the active palette through [`current`] so a theme switch is
//! picked up on the next redraw without threading the mode through every
//! style function.

use iced::Color;

/// Application theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Name stored in the settings file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Complete color palette for the application.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    // Primary brand colors
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    // Surface colors
    pub surface: Color,
    pub surface_sunken: Color,
    pub background: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    // Placement colors
    pub accent_green: Color,
    pub accent_yellow: Color,
    pub accent_red: Color,
    pub accent_purple: Color,

    // State colors
    pub hover: Color,
    pub selected: Color,

    // Border colors
    pub border_subtle: Color,
    pub border_medium: Color,

    // Shadow color
    pub shadow: Color,
}

impl Palette {
    /// Creates the light theme palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb(0.15, 0.39, 0.92), // Report blue
            primary_light: Color::from_rgb(0.38, 0.56, 0.98),
            primary_dark: Color::from_rgb(0.11, 0.31, 0.85),

            surface: Color::WHITE,
            surface_sunken: Color::from_rgb(0.976, 0.98, 0.984),
            background: Color::from_rgb(0.976, 0.98, 0.984),

            text_primary: Color::from_rgb(0.07, 0.09, 0.15),
            text_secondary: Color::from_rgb(0.29, 0.33, 0.39),
            text_muted: Color::from_rgb(0.42, 0.45, 0.50),
            text_on_primary: Color::WHITE,

            accent_green: Color::from_rgb(0.13, 0.77, 0.37),
            accent_yellow: Color::from_rgb(0.92, 0.70, 0.03),
            accent_red: Color::from_rgb(0.94, 0.27, 0.27),
            accent_purple: Color::from_rgb(0.58, 0.20, 0.92),

            hover: Color::from_rgb(0.95, 0.96, 0.97),
            selected: Color::from_rgb(0.94, 0.96, 1.0),

            border_subtle: Color::from_rgb(0.90, 0.91, 0.92),
            border_medium: Color::from_rgb(0.82, 0.84, 0.86),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
        }
    }

    /// Creates the dark theme palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb(0.38, 0.65, 0.98),
            primary_light: Color::from_rgb(0.58, 0.77, 0.99),
            primary_dark: Color::from_rgb(0.23, 0.51, 0.96),

            surface: Color::from_rgb(0.12, 0.13, 0.15),
            surface_sunken: Color::from_rgb(0.10, 0.11, 0.13),
            background: Color::from_rgb(0.08, 0.09, 0.11),

            text_primary: Color::from_rgb(0.92, 0.93, 0.95),
            text_secondary: Color::from_rgb(0.65, 0.68, 0.72),
            text_muted: Color::from_rgb(0.50, 0.53, 0.58),
            text_on_primary: Color::from_rgb(0.08, 0.09, 0.11),

            accent_green: Color::from_rgb(0.2, 0.9, 0.5),
            accent_yellow: Color::from_rgb(1.0, 0.85, 0.2),
            accent_red: Color::from_rgb(1.0, 0.35, 0.4),
            accent_purple: Color::from_rgb(0.7, 0.4, 1.0),

            hover: Color::from_rgb(0.14, 0.15, 0.17),
            selected: Color::from_rgb(0.10, 0.15, 0.22),

            border_subtle: Color::from_rgb(0.20, 0.21, 0.24),
            border_medium: Color::from_rgb(0.28, 0.29, 0.32),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.20),
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

/// `color` at the given opacity, for badge and banner backgrounds.
#[must_use]
pub const fn tint(color: Color, alpha: f32) -> Color {
    Color::from_rgba(color.r, color.g, color.b, alpha)
}

/// Current active palette - defaults to light mode.
pub static CURRENT: std::sync::LazyLock<std::sync::RwLock<Palette>> =
    std::sync::LazyLock::new(|| std::sync::RwLock::new(Palette::light()));

/// Sets the current global palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Gets a copy of the current palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::light(), |p| *p)
}
