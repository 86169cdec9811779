//! Deliverability report screen.
//!
//! Everything shown here is derived from the test on every render.

use chrono::Local;
use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Color, Element, Font, Length, font};

use emailspan_core::{ReportSummary, ResultStatus, SpamTest, TestResult};

use crate::message::{Message, ReportMessage};
use crate::model::ReportState;
use crate::style::widgets;
use crate::style::widgets::palette;

/// Render the report for `test`.
pub fn view_report<'a>(test: &'a SpamTest, state: ReportState) -> Element<'a, Message> {
    let p = palette::current();
    let summary = ReportSummary::from_test(test);

    let heading = column![
        text("Deliverability Report").size(24).color(p.text_primary),
        text(format!("Test completed at {}", summary.completed_label()))
            .size(14)
            .color(p.text_secondary),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let share_label = if state.link_copied {
        "\u{2713} Link copied"
    } else {
        "Share Report"
    };
    let actions = row![
        button(text(share_label).size(14))
            .padding([8, 16])
            .style(widgets::toolbar_button_style)
            .on_press(Message::Report(ReportMessage::ShareReport)),
        button(text("Export PDF").size(14))
            .padding([8, 16])
            .style(widgets::toolbar_button_style)
            .on_press(Message::Report(ReportMessage::ExportPdf)),
    ]
    .spacing(16);

    let results = test
        .results
        .iter()
        .fold(column![].spacing(12), |col, result| {
            col.push(view_result_row(result))
        });

    let mut content = column![container(heading).center_x(Length::Fill)].spacing(24);
    if let Some(card) = view_score_card(&summary) {
        content = content.push(card);
    }
    content
        .push(container(actions).center_x(Length::Fill))
        .push(results)
        .push(view_summary(&summary))
        .into()
}

/// Score card, only when the backend sent a score.
fn view_score_card(summary: &ReportSummary) -> Option<Element<'static, Message>> {
    let score = summary.score_label()?;
    let card = container(
        column![
            text("Overall Deliverability Score").size(16),
            text(score).size(48).font(Font {
                weight: font::Weight::Bold,
                ..Default::default()
            }),
            text(summary.banner()).size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .padding(32)
    .center_x(Length::Fill)
    .style(widgets::score_card_style);
    Some(card.into())
}

/// Icon and accent for a placement.
fn status_look(status: ResultStatus) -> (&'static str, Color) {
    let p = palette::current();
    match status {
        ResultStatus::Delivered => ("\u{2713}", p.accent_green),
        ResultStatus::Spam => ("\u{2717}", p.accent_red),
        ResultStatus::Promotions => ("\u{26A0}", p.accent_yellow),
        ResultStatus::NotReceived | ResultStatus::Pending | ResultStatus::Unknown => {
            ("\u{2717}", p.text_muted)
        }
    }
}

fn view_result_row(result: &TestResult) -> Element<'_, Message> {
    let p = palette::current();
    let (icon, accent) = status_look(result.status);

    let who = column![
        text(result.display_provider()).size(15).font(Font {
            weight: font::Weight::Semibold,
            ..Default::default()
        }),
        text(result.display_email()).size(13).color(p.text_secondary),
    ]
    .spacing(2);

    let mut placement = column![
        container(text(result.display_folder()).size(13))
            .padding([4, 12])
            .style(widgets::badge_style(accent)),
    ]
    .spacing(4)
    .align_x(Alignment::End);
    if let Some(at) = result.received_at {
        placement = placement.push(
            text(at.with_timezone(&Local).format("%H:%M:%S").to_string())
                .size(12)
                .color(p.text_muted),
        );
    }

    container(
        row![
            text(icon).size(20).color(accent),
            who,
            Space::new().width(Length::Fill),
            placement,
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    )
    .padding(20)
    .width(Length::Fill)
    .style(widgets::card_style)
    .into()
}

fn view_summary(summary: &ReportSummary) -> Element<'static, Message> {
    let p = palette::current();
    let c = summary.counts;

    let tile = |count: usize, label: &'static str, color: Color| {
        container(
            column![
                text(count.to_string()).size(26).color(color).font(Font {
                    weight: font::Weight::Bold,
                    ..Default::default()
                }),
                text(label).size(13).color(p.text_secondary),
            ]
            .spacing(4)
            .align_x(Alignment::Center),
        )
        .padding(16)
        .center_x(Length::FillPortion(1))
        .style(widgets::card_style)
    };

    container(
        column![
            text("Summary").size(16).color(p.text_primary),
            row![
                tile(c.delivered, "Inbox", p.accent_green),
                tile(c.spam, "Spam", p.accent_red),
                tile(c.promotions, "Promotions", p.accent_yellow),
                tile(c.not_received, "Not Received", p.text_secondary),
            ]
            .spacing(12),
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::Fill)
    .style(widgets::banner_style(p.text_muted))
    .into()
}
