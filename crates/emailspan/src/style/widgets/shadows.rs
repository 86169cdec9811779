//! Shadow presets and rounded corner radii.

use iced::{Color, Shadow, Vector};

use super::palette;

/// Rounded corner radii.
pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SMALL: f32 = 4.0;
    pub const MEDIUM: f32 = 8.0;
    pub const LARGE: f32 = 12.0;
    pub const XLARGE: f32 = 16.0; // Score card and main panel
    pub const PILL: f32 = 9999.0; // Status badges and step circles
}

pub fn none() -> Shadow {
    Shadow::default()
}

pub fn subtle() -> Shadow {
    Shadow {
        color: palette::current().shadow,
        offset: Vector::new(0.0, 1.0),
        blur_radius: 3.0,
    }
}

pub fn large() -> Shadow {
    Shadow {
        color: palette::current().shadow,
        offset: Vector::new(0.0, 8.0),
        blur_radius: 24.0,
    }
}

/// Glow effect - colored shadow under primary buttons.
pub const fn glow(color: Color) -> Shadow {
    Shadow {
        color: palette::tint(color, 0.3),
        offset: Vector::new(0.0, 2.0),
        blur_radius: 12.0,
    }
}

/// Strong glow effect - for hover states.
pub const fn glow_strong(color: Color) -> Shadow {
    Shadow {
        color: palette::tint(color, 0.5),
        offset: Vector::new(0.0, 4.0),
        blur_radius: 20.0,
    }
}
