// SPDX-License-Identifier: MPL-2.0
//! Settings screen: the configuration editor.
//!
//! The form edits the feed list, playback options, and style fields. Every
//! edit is translated into a [`ConfigPatch`] and published upward through
//! [`Effect::Edit`]; the shell applies it to produce the next configuration
//! value. The form itself holds no draft state - inputs always display the
//! current configuration, so a numeric keystroke that does not parse simply
//! leaves the stored value (and the input) unchanged.

use crate::config::{ColorField, Config, ConfigPatch, NumberField};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::theming::ThemeMode;
use iced::widget::{button, container, scrollable, text, text_input, toggler, Column, Row, Space};
use iced::{alignment::Vertical, Border, Element, Length, Theme};

/// Messages emitted by the settings form.
#[derive(Debug, Clone)]
pub enum Message {
    FeedNameChanged(usize, String),
    FeedUrlChanged(usize, String),
    AddFeed,
    DeleteFeed(usize),
    AutoplayToggled(bool),
    AuthQueryChanged(String),
    ThemeModeSelected(ThemeMode),
    AdvancedStylingToggled(bool),
    ColorChanged(ColorField, String),
    NumberChanged(NumberField, String),
    Back,
}

/// Outcome of a settings message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing changed (e.g., unparsable numeric input).
    None,
    /// Apply this patch to the configuration.
    Edit(ConfigPatch),
    /// Leave the settings screen.
    Back,
}

/// Translates a form message into a configuration patch.
///
/// Numeric inputs are parsed here; input that fails to parse produces
/// [`Effect::None`] so the previous value is retained.
pub fn handle_message(message: Message) -> Effect {
    match message {
        Message::FeedNameChanged(index, name) => {
            Effect::Edit(ConfigPatch::RenameFeed(index, name))
        }
        Message::FeedUrlChanged(index, url) => Effect::Edit(ConfigPatch::SetFeedUrl(index, url)),
        Message::AddFeed => Effect::Edit(ConfigPatch::AddFeed),
        Message::DeleteFeed(index) => Effect::Edit(ConfigPatch::RemoveFeed(index)),
        Message::AutoplayToggled(enabled) => Effect::Edit(ConfigPatch::SetAutoplay(enabled)),
        Message::AuthQueryChanged(query) => Effect::Edit(ConfigPatch::SetAuthQuery(query)),
        Message::ThemeModeSelected(mode) => Effect::Edit(ConfigPatch::SetThemeMode(mode)),
        Message::AdvancedStylingToggled(enabled) => {
            Effect::Edit(ConfigPatch::SetAdvancedStyles(enabled))
        }
        Message::ColorChanged(field, value) => Effect::Edit(ConfigPatch::SetColor(field, value)),
        Message::NumberChanged(field, value) => match value.trim().parse::<i32>() {
            Ok(number) => Effect::Edit(ConfigPatch::SetNumber(field, number)),
            Err(_) => Effect::None,
        },
        Message::Back => Effect::Back,
    }
}

/// Color fields in form order, with their label keys.
const COLOR_FIELDS: [(ColorField, &str); 16] = [
    (ColorField::WidgetBackground, "style-widget-background"),
    (ColorField::WidgetBorder, "style-widget-border"),
    (ColorField::DropdownBackground, "style-dropdown-background"),
    (ColorField::DropdownText, "style-dropdown-text"),
    (ColorField::DropdownArrow, "style-dropdown-arrow"),
    (ColorField::MenuBackground, "style-menu-background"),
    (ColorField::MenuText, "style-menu-text"),
    (ColorField::MenuHoverBackground, "style-menu-hover-background"),
    (ColorField::MenuHoverText, "style-menu-hover-text"),
    (ColorField::ExpandButtonBackground, "style-expand-background"),
    (ColorField::ExpandButtonIcon, "style-expand-icon"),
    (ColorField::PopupBackground, "style-popup-background"),
    (ColorField::Backdrop, "style-backdrop"),
    (ColorField::ShadowColor, "style-shadow-color"),
    (ColorField::MarkerBackground, "style-marker-background"),
    (ColorField::MarkerText, "style-marker-text"),
];

/// Numeric fields in form order, with their label keys.
const NUMBER_FIELDS: [(NumberField, &str); 10] = [
    (NumberField::DropdownRadius, "style-dropdown-radius"),
    (NumberField::MenuRadius, "style-menu-radius"),
    (NumberField::ExpandButtonRadius, "style-expand-radius"),
    (NumberField::PopupRadius, "style-popup-radius"),
    (NumberField::PopupGap, "style-popup-gap"),
    (NumberField::PopupPadding, "style-popup-padding"),
    (NumberField::PopupItemPadding, "style-popup-item-padding"),
    (NumberField::ShadowOffsetX, "style-shadow-offset-x"),
    (NumberField::ShadowOffsetY, "style-shadow-offset-y"),
    (NumberField::ShadowBlur, "style-shadow-blur"),
];

/// Context for rendering the settings screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub config: &'a Config,
}

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let header = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(
            button(text(ctx.i18n.tr("settings-back")).size(typography::BODY))
                .on_press(Message::Back)
                .style(button::secondary),
        )
        .push(text(ctx.i18n.tr("settings-title")).size(typography::TITLE_LG));

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .max_width(720.0)
        .push(header)
        .push(feeds_section(ctx))
        .push(general_section(ctx))
        .push(playback_section(ctx))
        .push(advanced_section(ctx));

    scrollable(
        container(content)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// Section panel surface, derived from the active Iced theme so the form
/// stays readable in both light and dark modes.
fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            radius: radius::MD.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

fn section<'a>(title: String, body: Column<'a, Message>) -> Element<'a, Message> {
    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text(title).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(panel)
    .into()
}

fn feeds_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let mut body = Column::new().spacing(spacing::MD);

    for (index, feed) in ctx.config.feeds.iter().enumerate() {
        let name_placeholder = format!("{} {}", i18n.tr("settings-feed-name-placeholder"), index + 1);
        let url_placeholder = format!("{} {}", i18n.tr("settings-feed-url-placeholder"), index + 1);

        let title_row = Row::new()
            .align_y(Vertical::Center)
            .push(
                text(format!("{} {}", i18n.tr("settings-feed-name"), index + 1))
                    .size(typography::BODY)
                    .width(Length::Fill),
            )
            .push(
                button(text(i18n.tr("settings-feed-delete")).size(typography::CAPTION))
                    .on_press(Message::DeleteFeed(index))
                    .style(button::danger),
            );

        body = body.push(
            container(
                Column::new()
                    .spacing(spacing::XXS)
                    .push(title_row)
                    .push(
                        text_input(&name_placeholder, &feed.name)
                            .on_input(move |value| Message::FeedNameChanged(index, value))
                            .padding(spacing::XS),
                    )
                    .push(
                        text(format!("{} {}", i18n.tr("settings-feed-url"), index + 1))
                            .size(typography::BODY),
                    )
                    .push(
                        text_input(&url_placeholder, &feed.url)
                            .on_input(move |value| Message::FeedUrlChanged(index, value))
                            .padding(spacing::XS),
                    ),
            )
            .width(Length::Fill)
            .padding(spacing::SM)
            .style(panel),
        );
    }

    body = body.push(
        container(
            button(text(i18n.tr("settings-add-feed")).size(typography::BODY))
                .on_press(Message::AddFeed)
                .style(button::primary),
        )
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center),
    );

    section(i18n.tr("settings-feeds-title"), body)
}

fn general_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let current = ctx.config.general.theme_mode;

    let mode_button = |label_key: &str, mode: ThemeMode| {
        let style = if mode == current {
            button::primary
        } else {
            button::secondary
        };
        button(text(i18n.tr(label_key)).size(typography::BODY))
            .on_press(Message::ThemeModeSelected(mode))
            .style(style)
    };

    let body = Column::new().spacing(spacing::SM).push(
        Row::new()
            .spacing(spacing::SM)
            .align_y(Vertical::Center)
            .push(
                text(i18n.tr("settings-theme-mode"))
                    .size(typography::BODY)
                    .width(Length::Fill),
            )
            .push(mode_button("theme-mode-light", ThemeMode::Light))
            .push(mode_button("theme-mode-dark", ThemeMode::Dark))
            .push(mode_button("theme-mode-system", ThemeMode::System)),
    );

    section(i18n.tr("settings-general-title"), body)
}

fn playback_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let auth_placeholder = i18n.tr("settings-auth-query-placeholder");

    let body = Column::new()
        .spacing(spacing::SM)
        .push(
            Row::new()
                .align_y(Vertical::Center)
                .push(
                    text(i18n.tr("settings-autoplay"))
                        .size(typography::BODY)
                        .width(Length::Fill),
                )
                .push(
                    toggler(ctx.config.playback.autoplay)
                        .on_toggle(Message::AutoplayToggled)
                        .size(20.0),
                ),
        )
        .push(text(i18n.tr("settings-auth-query")).size(typography::BODY))
        .push(
            text_input(&auth_placeholder, &ctx.config.playback.auth_query_string)
                .on_input(Message::AuthQueryChanged)
                .padding(spacing::XS),
        );

    section(i18n.tr("settings-playback-title"), body)
}

fn advanced_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let style = &ctx.config.style;

    let mut body = Column::new().spacing(spacing::SM).push(
        Row::new()
            .align_y(Vertical::Center)
            .push(
                text(i18n.tr("settings-advanced-styling"))
                    .size(typography::BODY)
                    .width(Length::Fill),
            )
            .push(
                toggler(style.use_advanced)
                    .on_toggle(Message::AdvancedStylingToggled)
                    .size(20.0),
            ),
    );

    if style.use_advanced {
        for (field, label_key) in COLOR_FIELDS {
            body = body.push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(Vertical::Center)
                    .push(
                        text(i18n.tr(label_key))
                            .size(typography::BODY)
                            .width(Length::Fill),
                    )
                    .push(
                        text_input("#rrggbb", style.color(field))
                            .on_input(move |value| Message::ColorChanged(field, value))
                            .padding(spacing::XXS)
                            .width(Length::Fixed(sizing::NUMBER_INPUT_WIDTH * 2.0)),
                    ),
            );
        }

        for (field, label_key) in NUMBER_FIELDS {
            let value = style.number(field).to_string();
            body = body.push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(Vertical::Center)
                    .push(
                        text(i18n.tr(label_key))
                            .size(typography::BODY)
                            .width(Length::Fill),
                    )
                    .push(
                        text_input("0", &value)
                            .on_input(move |input| Message::NumberChanged(field, input))
                            .padding(spacing::XXS)
                            .width(Length::Fixed(sizing::NUMBER_INPUT_WIDTH)),
                    ),
            );
        }
    } else {
        body = body.push(Space::new().height(Length::Fixed(spacing::XXS)));
    }

    section(i18n.tr("settings-advanced-title"), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_edits_translate_to_patches() {
        assert_eq!(
            handle_message(Message::FeedNameChanged(1, "Cam".into())),
            Effect::Edit(ConfigPatch::RenameFeed(1, "Cam".into()))
        );
        assert_eq!(
            handle_message(Message::AddFeed),
            Effect::Edit(ConfigPatch::AddFeed)
        );
        assert_eq!(
            handle_message(Message::DeleteFeed(0)),
            Effect::Edit(ConfigPatch::RemoveFeed(0))
        );
    }

    #[test]
    fn numeric_input_parses_to_number_patch() {
        assert_eq!(
            handle_message(Message::NumberChanged(NumberField::PopupGap, "12".into())),
            Effect::Edit(ConfigPatch::SetNumber(NumberField::PopupGap, 12))
        );
        assert_eq!(
            handle_message(Message::NumberChanged(
                NumberField::ShadowOffsetY,
                " -3 ".into()
            )),
            Effect::Edit(ConfigPatch::SetNumber(NumberField::ShadowOffsetY, -3))
        );
    }

    #[test]
    fn unparsable_numeric_input_retains_previous_value() {
        assert_eq!(
            handle_message(Message::NumberChanged(NumberField::PopupGap, "12a".into())),
            Effect::None
        );
        assert_eq!(
            handle_message(Message::NumberChanged(NumberField::PopupGap, String::new())),
            Effect::None
        );
    }

    #[test]
    fn back_leaves_the_screen_without_edits() {
        assert_eq!(handle_message(Message::Back), Effect::Back);
    }

    #[test]
    fn form_field_tables_cover_every_style_field() {
        // One label per editable field; duplicates would shadow each other
        let mut color_keys: Vec<&str> = COLOR_FIELDS.iter().map(|(_, key)| *key).collect();
        color_keys.sort_unstable();
        color_keys.dedup();
        assert_eq!(color_keys.len(), COLOR_FIELDS.len());

        let mut number_keys: Vec<&str> = NUMBER_FIELDS.iter().map(|(_, key)| *key).collect();
        number_keys.sort_unstable();
        number_keys.dedup();
        assert_eq!(number_keys.len(), NUMBER_FIELDS.len());
    }
}
