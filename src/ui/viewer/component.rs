// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.
//!
//! The component orchestrates feed selection and the collapsed/expanded
//! layouts. Playback side effects are returned as [`Effect`] values for the
//! application shell to translate into session-manager calls; the component
//! itself only holds presentation state (selection plus the latest frame per
//! surface).

use crate::config::Feed;
use crate::i18n::fluent::I18n;
use crate::playback::{SessionManager, SessionState, SurfaceId};
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::styles::{ExpandButtonStyle, StyleSheet};
use crate::ui::viewer::{feed_dropdown, selection};
use iced::widget::image::{Handle as ImageHandle, Image};
use iced::widget::{button, container, mouse_area, scrollable, text, Column, Row, Space, Stack};
use iced::{
    alignment::{Horizontal, Vertical},
    Background, Border, ContentFit, Element, Length, Shadow, Theme,
};
use std::collections::HashMap;

/// Fixed height of one grid cell in the expanded overlay.
const GRID_CELL_HEIGHT: f32 = 240.0;

/// Number of columns in the expanded grid.
const GRID_COLUMNS: usize = 2;

/// Messages emitted by viewer widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// A feed was picked from the dropdown menu.
    SelectFeed(usize),
    /// The dropdown button was clicked.
    ToggleMenu,
    /// The expand (or close) overlay button was clicked.
    ToggleExpand,
    /// A video surface was clicked.
    TogglePlayback(SurfaceId),
    /// The settings overlay button was clicked.
    OpenSettings,
}

/// Side effects the application should perform after handling a viewer
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Rebind the primary surface to the selected feed.
    ResyncPrimary,
    /// Attach grid sessions on the next scheduler turn.
    ResyncGridDeferred,
    /// Destroy all grid sessions, then rebind the primary surface.
    CollapseGrid,
    /// Toggle play/pause on the session owning the surface.
    TogglePlayback(SurfaceId),
    /// Switch to the settings screen.
    OpenSettings,
}

fn from_selection(effect: selection::Effect) -> Effect {
    match effect {
        selection::Effect::None => Effect::None,
        selection::Effect::ResyncPrimary => Effect::ResyncPrimary,
        selection::Effect::ResyncGridDeferred => Effect::ResyncGridDeferred,
        selection::Effect::CollapseGrid => Effect::CollapseGrid,
    }
}

/// Everything the view needs besides component state.
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
    pub feeds: &'a [Feed],
    pub sheet: &'a StyleSheet,
    pub manager: &'a SessionManager,
}

/// Viewer component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    selection: selection::State,
    frames: HashMap<SurfaceId, ImageHandle>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The feed selection state machine.
    #[must_use]
    pub fn selection(&self) -> &selection::State {
        &self.selection
    }

    /// Stores the latest decoded frame for a surface.
    pub fn set_frame(&mut self, surface: SurfaceId, handle: ImageHandle) {
        self.frames.insert(surface, handle);
    }

    /// Drops frames whose surface no longer owns a session.
    pub fn retain_frames(&mut self, keep: impl Fn(SurfaceId) -> bool) {
        self.frames.retain(|surface, _| keep(*surface));
    }

    /// Handles a viewer message, returning the side effect for the shell.
    pub fn handle_message(&mut self, message: Message, feed_count: usize) -> Effect {
        match message {
            Message::SelectFeed(index) => from_selection(self.selection.select_feed(index)),
            Message::ToggleMenu => from_selection(self.selection.toggle_menu(feed_count)),
            Message::ToggleExpand => from_selection(self.selection.toggle_expand()),
            Message::TogglePlayback(surface) => Effect::TogglePlayback(surface),
            Message::OpenSettings => Effect::OpenSettings,
        }
    }

    /// Reacts to an external feed-list change (settings edit).
    pub fn feeds_changed(&mut self, feed_count: usize) -> Effect {
        from_selection(self.selection.feeds_changed(feed_count))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // VIEW
    // ═══════════════════════════════════════════════════════════════════════

    pub fn view<'a>(&'a self, env: ViewEnv<'a>) -> Element<'a, Message> {
        if self.selection.is_expanded() {
            self.view_expanded(&env)
        } else {
            self.view_collapsed(&env)
        }
    }

    /// Collapsed layout: primary surface, dropdown, expand/settings buttons.
    fn view_collapsed<'a>(&'a self, env: &ViewEnv<'a>) -> Element<'a, Message> {
        let sheet = env.sheet;

        let mut stack = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(self.surface_view(SurfaceId::Primary, env));

        if env.feeds.len() > 1 {
            let dropdown = feed_dropdown::view(&feed_dropdown::ViewContext {
                i18n: env.i18n,
                feeds: env.feeds,
                current: self.selection.current(),
                menu_open: self.selection.is_menu_open(),
                style: &sheet.dropdown,
            });
            stack = stack.push(
                container(dropdown)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Left)
                    .align_y(Vertical::Top)
                    .padding(spacing::SM),
            );
        }

        let corner_buttons = Row::new()
            .spacing(spacing::XXS)
            .push(overlay_button(
                "⚙",
                Message::OpenSettings,
                &sheet.expand,
            ))
            .push(overlay_button("⛶", Message::ToggleExpand, &sheet.expand));
        stack = stack.push(
            container(corner_buttons)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Top)
                .padding(spacing::SM),
        );

        if env.feeds.is_empty() {
            stack = stack.push(
                container(
                    text(env.i18n.tr("feeds-empty-placeholder"))
                        .size(typography::BODY)
                        .color(sheet.widget.placeholder_text),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
            );
        }

        let widget_background = sheet.widget.background;
        let widget_border = sheet.widget.border;
        container(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(widget_background)),
                border: Border {
                    color: widget_border,
                    width: 1.0,
                    radius: radius::NONE.into(),
                },
                ..container::Style::default()
            })
            .into()
    }

    /// Expanded layout: modal backdrop, popup panel, 2-column feed grid.
    fn view_expanded<'a>(&'a self, env: &ViewEnv<'a>) -> Element<'a, Message> {
        let popup = &env.sheet.popup;

        let mut grid = Column::new().spacing(popup.gap).width(Length::Fill);
        for chunk in env
            .feeds
            .iter()
            .enumerate()
            .collect::<Vec<_>>()
            .chunks(GRID_COLUMNS)
        {
            let mut row = Row::new().spacing(popup.gap).width(Length::Fill);
            for (index, feed) in chunk {
                row = row.push(self.grid_cell(*index, feed, env));
            }
            // Keep cell widths stable when the last row is short
            for _ in chunk.len()..GRID_COLUMNS {
                row = row.push(Space::new().width(Length::FillPortion(1)));
            }
            grid = grid.push(row);
        }

        let close_overlay = container(overlay_button("×", Message::ToggleExpand, &env.sheet.expand))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Right)
            .align_y(Vertical::Top)
            .padding(spacing::XS);

        let panel_content = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(scrollable(grid).width(Length::Fill).height(Length::Fill))
            .push(close_overlay);

        let popup_background = popup.background;
        let popup_radius = popup.radius;
        let popup_shadow = popup.shadow;
        let panel = container(panel_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(popup.padding)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(popup_background)),
                border: Border {
                    radius: popup_radius.into(),
                    ..Border::default()
                },
                shadow: popup_shadow,
                ..container::Style::default()
            });

        let backdrop = popup.backdrop;
        container(panel)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::XL)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(backdrop)),
                ..container::Style::default()
            })
            .into()
    }

    /// One cell of the expanded grid: surface plus feed-name marker.
    fn grid_cell<'a>(&'a self, index: usize, feed: &'a Feed, env: &ViewEnv<'a>) -> Element<'a, Message> {
        let popup = &env.sheet.popup;
        let surface = SurfaceId::Grid(index);

        let mut cell = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(self.surface_view(surface, env));

        if !feed.name.is_empty() {
            let marker_background = popup.marker_background;
            let marker = container(
                text(feed.name.as_str())
                    .size(typography::CAPTION)
                    .color(popup.marker_text),
            )
            .padding([spacing::XXS, spacing::XS])
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(marker_background)),
                border: Border {
                    radius: radius::SM.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            });

            cell = cell.push(
                container(marker)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Left)
                    .align_y(Vertical::Bottom)
                    .padding(spacing::XS),
            );
        }

        container(cell)
            .width(Length::FillPortion(1))
            .height(Length::Fixed(GRID_CELL_HEIGHT))
            .padding(popup.item_padding)
            .into()
    }

    /// The video area for one surface: latest frame, or session status.
    fn surface_view<'a>(&'a self, surface: SurfaceId, env: &ViewEnv<'a>) -> Element<'a, Message> {
        let mut stack = Stack::new().width(Length::Fill).height(Length::Fill);

        if let Some(handle) = self.frames.get(&surface) {
            stack = stack.push(
                Image::new(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .content_fit(ContentFit::Cover),
            );
        }

        if let Some(status) = session_status_line(surface, env) {
            stack = stack.push(
                container(status)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            );
        }

        mouse_area(stack)
            .on_press(Message::TogglePlayback(surface))
            .into()
    }
}

/// Status text shown over a surface that is paused or failed.
fn session_status_line<'a>(surface: SurfaceId, env: &ViewEnv<'a>) -> Option<Element<'a, Message>> {
    let session = env.manager.session(surface)?;
    match session.state() {
        SessionState::Paused => Some(
            text(env.i18n.tr("feed-paused-hint"))
                .size(typography::CAPTION)
                .color(env.sheet.widget.placeholder_text)
                .into(),
        ),
        SessionState::Failed(error) => Some(
            text(env.i18n.tr(error.i18n_key()))
                .size(typography::CAPTION)
                .color(palette::ERROR_500)
                .into(),
        ),
        _ => None,
    }
}

/// Small square overlay button with a glyph label (expand, close, settings).
fn overlay_button<'a>(
    glyph: &'a str,
    message: Message,
    style: &ExpandButtonStyle,
) -> Element<'a, Message> {
    let style = style.clone();

    button(
        text(glyph)
            .size(typography::TITLE_SM)
            .color(style.icon)
            .width(Length::Fill)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fixed(sizing::OVERLAY_BUTTON))
    .height(Length::Fixed(sizing::OVERLAY_BUTTON))
    .on_press(message)
    .style(move |_theme: &Theme, status| {
        let background = if matches!(status, button::Status::Hovered) {
            style.background.scale_alpha(0.85)
        } else {
            style.background
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: style.icon,
            border: Border {
                radius: style.radius.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
            snap: true,
        }
    })
    .into()
}
