//! Button style functions with theme support.

use iced::widget::button;
use iced::{Background, Border, Color};

use super::palette;
use super::shadows;
use super::shadows::radius;

/// Filled button in `fill` with a soft glow, shared by the call-to-action styles.
fn filled(fill: Color, fill_hover: Color, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(fill)),
        text_color: p.text_on_primary,
        border: Border {
            color: fill,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::glow(fill),
        snap: false,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(fill_hover)),
            border: Border {
                color: fill_hover,
                ..base.border
            },
            shadow: shadows::glow_strong(fill),
            ..base
        },
        button::Status::Pressed => button::Style {
            shadow: shadows::subtle(),
            ..base
        },
        // In-flight actions render dimmed rather than grey
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(palette::tint(fill, 0.5))),
            border: Border {
                color: Color::TRANSPARENT,
                ..base.border
            },
            shadow: shadows::none(),
            ..base
        },
    }
}

/// Primary button style - generate, check results.
pub fn primary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();
    filled(p.primary, p.primary_dark, status)
}

/// Send button style - green call to action.
pub fn success_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();
    filled(p.accent_green, palette::tint(p.accent_green, 0.85), status)
}

/// Secondary/ghost button style - rounded with subtle hover.
pub fn secondary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.text_primary,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::LARGE.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    match status {
        button::Status::Active | button::Status::Disabled => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.hover)),
            border: Border {
                color: p.border_subtle,
                width: 1.0,
                radius: radius::LARGE.into(),
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.selected)),
            ..base
        },
    }
}

/// Toolbar button style - copy, share and export.
pub fn toolbar_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(p.surface)),
        text_color: p.primary,
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.hover)),
            border: Border {
                color: p.border_medium,
                ..base.border
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.selected)),
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: p.text_muted,
            ..base
        },
    }
}
