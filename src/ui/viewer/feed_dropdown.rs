// SPDX-License-Identifier: MPL-2.0
//! Feed selector dropdown for the collapsed layout.
//!
//! Renders the current-feed button and, when open, the menu of selectable
//! feeds. Open/closed state lives in the selection state machine; this module
//! only draws. Feeds missing a name or URL are filtered out of the menu, the
//! way the source platform hid half-configured entries.

use crate::config::Feed;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::DropdownStyle;
use crate::ui::viewer::component::Message;
use iced::widget::{button, container, text, Column, Row};
use iced::{alignment::Vertical, Background, Border, Element, Length, Shadow, Theme};

/// Context for rendering the feed dropdown.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub feeds: &'a [Feed],
    pub current: usize,
    pub menu_open: bool,
    pub style: &'a DropdownStyle,
}

/// Builds the dropdown overlay (button plus optional menu).
pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut column = Column::new().width(Length::Fixed(sizing::DROPDOWN_WIDTH));

    column = column.push(build_button(ctx));
    if ctx.menu_open {
        column = column.push(build_menu(ctx));
    }

    column.into()
}

/// The always-visible button showing the current feed's name.
fn build_button<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let style = ctx.style.clone();

    let label = ctx
        .feeds
        .get(ctx.current)
        .filter(|feed| !feed.name.is_empty())
        .map_or_else(
            || ctx.i18n.tr("feed-select-placeholder"),
            |feed| feed.name.clone(),
        );

    let row = Row::new()
        .push(
            text(label)
                .size(typography::BODY)
                .color(style.button_text)
                .width(Length::Fill),
        )
        .push(text("▾").size(typography::BODY).color(style.arrow))
        .align_y(Vertical::Center)
        .padding([0.0, spacing::XS]);

    button(row)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::DROPDOWN_BUTTON_HEIGHT))
        .on_press(Message::ToggleMenu)
        .style(move |_theme: &Theme, _status| button::Style {
            background: Some(Background::Color(style.button_background)),
            text_color: style.button_text,
            border: Border {
                color: style.button_background,
                width: 1.0,
                radius: style.button_radius.into(),
            },
            shadow: Shadow::default(),
            snap: true,
        })
        .into()
}

/// The menu listing every fully-configured feed.
fn build_menu<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let style = ctx.style.clone();

    let mut items = Column::new();
    for (index, feed) in ctx.feeds.iter().enumerate() {
        if !feed.is_complete() {
            continue;
        }

        let item_style = style.clone();
        items = items.push(
            button(
                text(feed.name.clone())
                    .size(typography::BODY)
                    .width(Length::Fill),
            )
            .width(Length::Fill)
            .padding([spacing::XXS, spacing::XS])
            .on_press(Message::SelectFeed(index))
            .style(move |_theme: &Theme, status| {
                let hovered = matches!(status, button::Status::Hovered);
                button::Style {
                    background: Some(Background::Color(if hovered {
                        item_style.menu_hover_background
                    } else {
                        item_style.menu_background
                    })),
                    text_color: if hovered {
                        item_style.menu_hover_text
                    } else {
                        item_style.menu_text
                    },
                    border: Border::default(),
                    shadow: Shadow::default(),
                    snap: true,
                }
            }),
        );
    }

    container(items)
        .width(Length::Fill)
        .padding([spacing::XXS, 0.0])
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(style.menu_background)),
            border: Border {
                color: style.menu_background,
                width: 1.0,
                radius: style.menu_radius.into(),
            },
            ..container::Style::default()
        })
        .into()
}
