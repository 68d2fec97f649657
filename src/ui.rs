use iced::{
    alignment,
    widget::{button, column, container, row, scrollable, text},
    Background, Border, Color, Element, Length,
};

use crate::conversation::{ChatMessage, Citation, Role};
use crate::fleet;
use crate::Message;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const TYPING_LINE: &str = "Composing your recommendation…";

const SURFACE: Color = Color {
    r: 0.16,
    g: 0.17,
    b: 0.20,
    a: 1.0,
};
const CHIP_BLUE: Color = Color {
    r: 0.45,
    g: 0.62,
    b: 0.95,
    a: 1.0,
};
const MUTED: Color = Color {
    r: 0.55,
    g: 0.57,
    b: 0.62,
    a: 1.0,
};

pub fn role_alignment(role: Role) -> alignment::Horizontal {
    match role {
        Role::User => alignment::Horizontal::Right,
        Role::Model => alignment::Horizontal::Left,
    }
}

/// The full visual transcript: one bubble per stored message, plus the
/// transient in-progress affordance while a request is outstanding. Anchored
/// to the bottom so the newest entry is always in view.
pub fn transcript<'a>(
    messages: &'a [ChatMessage],
    typing: bool,
    frame: usize,
) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = messages.iter().map(bubble).collect();
    if typing {
        items.push(typing_indicator(frame));
    }

    scrollable(column(items).spacing(14).padding(16))
        .height(Length::Fill)
        .anchor_bottom()
        .into()
}

fn bubble(message: &ChatMessage) -> Element<'_, Message> {
    let is_user = message.role == Role::User;

    let body = container(text(&message.text).size(14))
        .padding(12)
        .max_width(320)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(if is_user {
                Color::WHITE
            } else {
                SURFACE
            })),
            text_color: Some(if is_user { Color::BLACK } else { Color::WHITE }),
            border: Border {
                radius: 12.0.into(),
                ..Border::default()
            },
            ..Default::default()
        });

    let mut stack = column![body].spacing(6);

    let chips: Vec<Element<'_, Message>> = message
        .sources
        .iter()
        .filter(|citation| citation.is_complete())
        .map(chip)
        .collect();
    if !chips.is_empty() {
        stack = stack.push(row(chips).spacing(6));
    }

    if message.role == Role::Model {
        stack = stack.push(
            button(text("[Copy]").size(11).style(|_theme| {
                iced::widget::text::Style { color: Some(MUTED) }
            }))
            .padding(0)
            .style(|_theme, _status| iced::widget::button::Style {
                background: None,
                ..Default::default()
            })
            .on_press(Message::CopyReply(message.text.clone())),
        );
    }

    container(stack)
        .width(Length::Fill)
        .align_x(role_alignment(message.role))
        .into()
}

fn chip(citation: &Citation) -> Element<'_, Message> {
    button(text(citation.chip_label()).size(11))
        .padding([2, 8])
        .style(|_theme, status| {
            let hovered = status == iced::widget::button::Status::Hovered;
            iced::widget::button::Style {
                background: Some(Background::Color(Color {
                    a: if hovered { 0.35 } else { 0.2 },
                    ..CHIP_BLUE
                })),
                text_color: CHIP_BLUE,
                border: Border {
                    color: Color {
                        a: 0.4,
                        ..CHIP_BLUE
                    },
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(Message::OpenSource(citation.uri.clone()))
        .into()
}

fn typing_indicator(frame: usize) -> Element<'static, Message> {
    let indicator = container(
        row![
            text(SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]).size(14),
            text(TYPING_LINE)
                .size(12)
                .style(|_theme| iced::widget::text::Style { color: Some(MUTED) }),
        ]
        .spacing(8),
    )
    .padding(12)
    .style(|_theme| container::Style {
        background: Some(Background::Color(SURFACE)),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 12.0.into(),
            ..Border::default()
        },
        ..Default::default()
    });

    container(indicator)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Left)
        .into()
}

/// Guided first questions, one per fleet model.
pub fn starters() -> Element<'static, Message> {
    let buttons: Vec<Element<'static, Message>> = fleet::STARTERS
        .iter()
        .map(|&starter| {
            button(text(starter).size(12))
                .width(Length::Fill)
                .padding(8)
                .style(|_theme, status| {
                    let hovered = status == iced::widget::button::Status::Hovered;
                    iced::widget::button::Style {
                        background: Some(Background::Color(Color {
                            a: if hovered { 0.8 } else { 0.5 },
                            ..SURFACE
                        })),
                        text_color: Color::WHITE,
                        border: Border {
                            radius: 8.0.into(),
                            ..Border::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::StarterPicked(starter))
                .into()
        })
        .collect();

    column(buttons).spacing(6).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entries_align_right_model_left() {
        assert_eq!(role_alignment(Role::User), alignment::Horizontal::Right);
        assert_eq!(role_alignment(Role::Model), alignment::Horizontal::Left);
    }
}
