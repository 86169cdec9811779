//! Send and check screen.

use iced::widget::{Space, button, column, container, row, text, text_input};
use iced::{Alignment, Element, Font, Length};

use crate::message::{InboxesMessage, Message};
use crate::model::InboxesState;
use crate::style::widgets;
use crate::style::widgets::palette;

const INSTRUCTIONS: [&str; 3] = [
    "1. Enter the recipient email below.",
    "2. Click \"Send Test Email\" to send from our authorized sender.",
    "3. Click \"Check Results\" to see delivery status.",
];

/// Render the send and check screen.
pub fn view_inboxes<'a>(
    test_code: Option<&'a str>,
    user_email: &'a str,
    state: &'a InboxesState,
) -> Element<'a, Message> {
    let p = palette::current();

    let title = text("Send Your Test Email").size(24).color(p.text_primary);
    let subtitle = text("Copy the test code and include it in your email subject or body")
        .size(14)
        .color(p.text_secondary);

    let placeholder = if user_email.is_empty() {
        "Enter recipient email"
    } else {
        user_email
    };
    let recipient = column![
        text("Recipient Email").size(12).color(p.text_secondary),
        text_input(placeholder, &state.recipient)
            .on_input(|s| Message::Inboxes(InboxesMessage::RecipientChanged(s)))
            .padding(10)
            .style(widgets::form_input_style),
        text("Email will be sent from our authorized sender to the address above.")
            .size(11)
            .color(p.text_muted),
    ]
    .spacing(4);

    let send = button(text(if state.is_sending {
        "Sending..."
    } else {
        "Send Test Email"
    }))
    .padding([12, 28])
    .style(widgets::success_button_style)
    .on_press_maybe(
        (!state.is_sending).then_some(Message::Inboxes(InboxesMessage::SendEmail)),
    );

    let check = button(text(if state.is_checking {
        "Checking..."
    } else {
        "Check Results"
    }))
    .padding([12, 28])
    .style(widgets::primary_button_style)
    .on_press_maybe(
        (!state.is_checking).then_some(Message::Inboxes(InboxesMessage::CheckResults)),
    );

    let last_checked: Element<'a, Message> = state.last_checked_label().map_or_else(
        || Space::new().height(0).into(),
        |label| {
            container(text(label).size(13).color(p.text_muted))
                .center_x(Length::Fill)
                .into()
        },
    );

    column![
        container(column![title, subtitle].spacing(8).align_x(Alignment::Center))
            .center_x(Length::Fill),
        create_code_box(test_code, state.code_copied),
        create_instructions(),
        recipient,
        container(row![send, check].spacing(16)).center_x(Length::Fill),
        last_checked,
    ]
    .spacing(20)
    .into()
}

/// Create the test code box with its copy button.
fn create_code_box(test_code: Option<&str>, copied: bool) -> Element<'_, Message> {
    let p = palette::current();

    let code = column![
        text("Your Test Code").size(15),
        text(test_code.unwrap_or("N/A"))
            .size(20)
            .font(Font::MONOSPACE),
        text("Include this code in your email's subject or body").size(12),
    ]
    .spacing(4);

    let copy = button(text(if copied { "\u{2713} Copied!" } else { "Copy" }).size(14))
        .padding([8, 16])
        .style(widgets::toolbar_button_style)
        .on_press_maybe(
            test_code.map(|_| Message::Inboxes(InboxesMessage::CopyCode)),
        );

    container(
        row![code, Space::new().width(Length::Fill), copy].align_y(Alignment::Center),
    )
    .padding(20)
    .width(Length::Fill)
    .style(widgets::banner_style(p.primary))
    .into()
}

fn create_instructions() -> Element<'static, Message> {
    let p = palette::current();
    let steps = INSTRUCTIONS
        .iter()
        .fold(column![].spacing(6), |col, step| col.push(text(*step).size(13)));

    container(column![text("Instructions:").size(15), steps].spacing(8))
        .padding(20)
        .width(Length::Fill)
        .style(widgets::banner_style(p.accent_yellow))
        .into()
}
