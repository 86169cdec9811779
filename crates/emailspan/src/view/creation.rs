//! Create-test screen.
//!
//! Collects the user's email and generates a test code.

use iced::alignment::Horizontal;
use iced::widget::{Space, button, column, container, text, text_input};
use iced::{Alignment, Element, Length};

use crate::message::{CreationMessage, Message};
use crate::model::CreationState;
use crate::style::widgets;
use crate::style::widgets::palette;

const HOW_IT_WORKS: [&str; 4] = [
    "1. Enter your email to get a unique test code",
    "2. Send an email to our test addresses with the code",
    "3. We'll analyze where your email landed",
    "4. Get your comprehensive deliverability report",
];

/// Render the create-test screen.
pub fn view_creation(state: &CreationState) -> Element<'_, Message> {
    let p = palette::current();

    let title = text("Start Your Email Deliverability Test")
        .size(24)
        .color(p.text_primary);

    let subtitle = text(
        "Enter your email address to generate a unique test code and get started \
         with testing your email deliverability.",
    )
    .size(14)
    .color(p.text_secondary)
    .align_x(Horizontal::Center);

    let email_input = text_input("your@email.com", &state.email)
        .on_input_maybe(
            (!state.is_submitting)
                .then_some(|s: String| Message::Creation(CreationMessage::EmailChanged(s))),
        )
        .on_submit_maybe(
            (!state.is_submitting).then_some(Message::Creation(CreationMessage::Submit)),
        )
        .padding(12)
        .style(widgets::form_input_style);

    let submit = button(
        container(
            text(if state.is_submitting {
                "Creating Test..."
            } else {
                "Generate Test Code \u{2192}"
            })
            .size(15),
        )
        .center_x(Length::Fill),
    )
    .width(Length::Fill)
    .padding([12, 24])
    .style(widgets::primary_button_style)
    .on_press_maybe((!state.is_submitting).then_some(Message::Creation(CreationMessage::Submit)));

    let form = column![email_input, create_error_display(state), submit]
        .spacing(16)
        .max_width(420);

    column![
        title,
        subtitle,
        Space::new().height(8),
        form,
        Space::new().height(8),
        create_how_it_works(),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

/// Create the error banner, if the last submission failed.
fn create_error_display(state: &CreationState) -> Element<'_, Message> {
    let p = palette::current();
    state.error.as_ref().map_or_else(
        || Space::new().height(0).into(),
        |error| {
            container(text(error).size(14))
                .padding(12)
                .width(Length::Fill)
                .style(widgets::banner_style(p.accent_red))
                .into()
        },
    )
}

fn create_how_it_works() -> Element<'static, Message> {
    let p = palette::current();
    let steps = HOW_IT_WORKS
        .iter()
        .fold(column![].spacing(6), |col, step| {
            col.push(text(*step).size(13).color(p.text_secondary))
        });

    container(
        column![
            text("How it works:").size(15).color(p.text_primary),
            steps
        ]
        .spacing(8),
    )
    .padding(16)
    .max_width(420)
    .style(widgets::card_style)
    .into()
}
