//! Container style functions with theme support.

use iced::widget::container;
use iced::{Background, Border, Color, Gradient, Radians, gradient};

use emailspan_core::StepState;

use super::palette;
use super::shadows;
use super::shadows::radius;

/// Header bar style - surface with bottom border.
pub fn header_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        shadow: shadows::none(),
        ..Default::default()
    }
}

/// Window background behind the wizard panel.
pub fn background_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.background)),
        text_color: Some(p.text_primary),
        ..Default::default()
    }
}

/// The wizard panel holding the active screen.
pub fn panel_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::XLARGE.into(),
        },
        shadow: shadows::large(),
        ..Default::default()
    }
}

/// Card style - result rows and the "how it works" box.
pub fn card_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface_sunken)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::LARGE.into(),
        },
        ..Default::default()
    }
}

/// Tinted banner in `accent` - test code box, instructions, errors.
pub fn banner_style(accent: Color) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(Background::Color(palette::tint(accent, 0.08))),
        text_color: Some(accent),
        border: Border {
            color: palette::tint(accent, 0.35),
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        ..Default::default()
    }
}

/// Pill badge in `accent` - placement status and offline indicator.
pub fn badge_style(accent: Color) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(Background::Color(palette::tint(accent, 0.15))),
        text_color: Some(accent),
        border: Border {
            radius: radius::PILL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Overall score card - blue to purple gradient.
pub fn score_card_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    let fill = gradient::Linear::new(Radians(std::f32::consts::FRAC_PI_2))
        .add_stop(0.0, p.primary)
        .add_stop(1.0, p.accent_purple);

    container::Style {
        background: Some(Background::Gradient(Gradient::Linear(fill))),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: radius::XLARGE.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Progress stepper circle.
pub fn step_circle_style(state: StepState) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| {
        let p = palette::current();
        let (fill, border, text) = match state {
            StepState::Active => (p.primary, p.primary, p.text_on_primary),
            StepState::Completed => (p.accent_green, p.accent_green, p.text_on_primary),
            StepState::Upcoming => (Color::TRANSPARENT, p.border_medium, p.text_muted),
        };

        container::Style {
            background: Some(Background::Color(fill)),
            text_color: Some(text),
            border: Border {
                color: border,
                width: 2.0,
                radius: radius::PILL.into(),
            },
            ..Default::default()
        }
    }
}

/// Line between two stepper circles.
pub fn step_connector_style(done: bool) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| {
        let p = palette::current();
        container::Style {
            background: Some(Background::Color(if done {
                p.accent_green
            } else {
                p.border_medium
            })),
            border: Border {
                radius: radius::SMALL.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
