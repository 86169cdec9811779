//! Header with title, progress stepper and backend status.

use iced::widget::{Row, Space, button, column, container, row, text};
use iced::{Alignment, Element, Font, Length, font};

use emailspan_core::{Phase, StepState};

use crate::message::Message;
use crate::style::widgets::palette::{self, ThemeMode};
use crate::style::widgets::{
    badge_style, header_style, secondary_button_style, step_circle_style, step_connector_style,
};

/// Renders the application header.
pub fn view_header(
    phase: Phase,
    is_offline: bool,
    theme_mode: ThemeMode,
) -> Element<'static, Message> {
    let p = palette::current();

    let title = text("Email Spam Report Tool")
        .size(22)
        .font(Font {
            weight: font::Weight::Bold,
            ..Default::default()
        })
        .color(p.text_primary);

    let tagline = text("Test your email deliverability across major providers.")
        .size(13)
        .color(p.text_secondary);

    // Offline indicator
    let offline_indicator: Element<'static, Message> = if is_offline {
        container(
            text("Offline").size(11).font(Font {
                weight: font::Weight::Bold,
                ..Default::default()
            }),
        )
        .padding([4, 8])
        .style(badge_style(p.accent_yellow))
        .into()
    } else {
        Space::new().width(0).into()
    };

    let theme_icon = match theme_mode {
        ThemeMode::Light => "\u{263E}",
        ThemeMode::Dark => "\u{2600}",
    };
    let theme_btn = button(text(theme_icon).size(18).color(p.text_secondary))
        .padding([8, 12])
        .style(secondary_button_style)
        .on_press(Message::ToggleTheme);

    let top = row![
        column![title, tagline].spacing(2),
        offline_indicator,
        Space::new().width(Length::Fill),
        theme_btn,
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(
        column![top, container(view_stepper(phase)).center_x(Length::Fill)].spacing(16),
    )
    .padding([16, 24])
    .width(Length::Fill)
    .style(header_style)
    .into()
}

/// Renders the three-step progress indicator.
fn view_stepper(current: Phase) -> Element<'static, Message> {
    let p = palette::current();
    let mut steps: Row<'static, Message> = Row::new().spacing(12).align_y(Alignment::Center);

    for (phase, state) in Phase::steps(current) {
        let circle = container(text((phase.index() + 1).to_string()).size(14).font(Font {
            weight: font::Weight::Semibold,
            ..Default::default()
        }))
        .center_x(32)
        .center_y(32)
        .style(step_circle_style(state));

        let label_color = if state == StepState::Active {
            p.primary
        } else {
            p.text_muted
        };
        steps = steps.push(
            row![circle, text(phase.label()).size(14).color(label_color)]
                .spacing(8)
                .align_y(Alignment::Center),
        );

        if phase != Phase::Report {
            steps = steps.push(
                container(Space::new())
                    .width(48)
                    .height(2)
                    .style(step_connector_style(phase.index() < current.index())),
            );
        }
    }

    steps.into()
}
