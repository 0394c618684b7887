// SPDX-License-Identifier: MPL-2.0
//! Style resolution for the feed widget.
//!
//! [`resolve`] is a pure function from configuration and theme to a
//! [`StyleSheet`]: same inputs, same output, no caching and no hidden
//! state. Two mutually exclusive modes exist:
//!
//! - **Theme mode** (default): every visual value is derived from the
//!   application [`ColorScheme`], with fixed structural values from the
//!   design-token scales.
//! - **Custom mode** (`use_advanced`): every visual value is read from the
//!   configuration. Color strings that fail to parse fall back to their
//!   theme-mode value, so a half-typed color never blanks the widget.

use crate::config::StyleConfig;
use crate::ui::design_tokens::{opacity, palette, radius, spacing};
use crate::ui::styles::css_color;
use crate::ui::theming::AppTheme;
use iced::{Color, Shadow, Vector};

/// Resolved styling for the widget frame and primary surface.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetStyle {
    pub background: Color,
    pub border: Color,
    pub placeholder_text: Color,
}

/// Resolved styling for the feed selector button and its menu.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownStyle {
    pub button_background: Color,
    pub button_text: Color,
    pub arrow: Color,
    pub button_radius: f32,
    pub menu_background: Color,
    pub menu_text: Color,
    pub menu_hover_background: Color,
    pub menu_hover_text: Color,
    pub menu_radius: f32,
}

/// Resolved styling for the expand/close overlay buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandButtonStyle {
    pub background: Color,
    pub icon: Color,
    pub radius: f32,
}

/// Resolved styling for the expanded grid overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupStyle {
    pub background: Color,
    pub radius: f32,
    pub gap: f32,
    pub padding: f32,
    pub item_padding: f32,
    pub backdrop: Color,
    pub shadow: Shadow,
    pub marker_background: Color,
    pub marker_text: Color,
}

/// Complete render-time stylesheet for the feed widget.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub widget: WidgetStyle,
    pub dropdown: DropdownStyle,
    pub expand: ExpandButtonStyle,
    pub popup: PopupStyle,
}

/// Resolves the stylesheet from configuration and theme.
#[must_use]
pub fn resolve(style: &StyleConfig, theme: &AppTheme) -> StyleSheet {
    let base = from_theme(theme);
    if !style.use_advanced {
        return base;
    }
    customize(style, base)
}

/// Theme-mode stylesheet: everything derived from the color scheme.
fn from_theme(theme: &AppTheme) -> StyleSheet {
    let colors = &theme.colors;

    StyleSheet {
        widget: WidgetStyle {
            // Video surfaces always sit on black; the scheme styles the chrome.
            background: palette::BLACK,
            border: colors.surface_tertiary,
            placeholder_text: colors.overlay_text,
        },
        dropdown: DropdownStyle {
            button_background: colors.surface_secondary,
            button_text: colors.text_primary,
            arrow: colors.text_primary,
            button_radius: radius::SM,
            menu_background: colors.surface_secondary,
            menu_text: colors.text_primary,
            menu_hover_background: colors.surface_tertiary,
            menu_hover_text: colors.text_primary,
            menu_radius: radius::SM,
        },
        expand: ExpandButtonStyle {
            background: colors.surface_secondary,
            icon: colors.text_primary,
            radius: radius::SM,
        },
        popup: PopupStyle {
            background: colors.surface_primary,
            radius: radius::MD,
            gap: spacing::XS,
            padding: spacing::MD,
            item_padding: spacing::XXS,
            backdrop: colors.overlay_background,
            shadow: Shadow {
                color: Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..palette::BLACK
                },
                offset: Vector { x: 0.0, y: 4.0 },
                blur_radius: 8.0,
            },
            marker_background: colors.overlay_background,
            marker_text: colors.overlay_text,
        },
    }
}

/// Custom-mode stylesheet: configuration values layered over the theme
/// fallbacks.
fn customize(style: &StyleConfig, base: StyleSheet) -> StyleSheet {
    let color = |value: &str, fallback: Color| css_color::parse(value).unwrap_or(fallback);
    let length = |value: i32| value.max(0) as f32;

    StyleSheet {
        widget: WidgetStyle {
            background: color(&style.widget_background_color, base.widget.background),
            border: color(&style.widget_border_color, base.widget.border),
            placeholder_text: base.widget.placeholder_text,
        },
        dropdown: DropdownStyle {
            button_background: color(
                &style.dropdown_background_color,
                base.dropdown.button_background,
            ),
            button_text: color(&style.dropdown_text_color, base.dropdown.button_text),
            arrow: color(&style.dropdown_arrow_color, base.dropdown.arrow),
            button_radius: length(style.dropdown_border_radius),
            menu_background: color(&style.menu_background_color, base.dropdown.menu_background),
            menu_text: color(&style.menu_text_color, base.dropdown.menu_text),
            menu_hover_background: color(
                &style.menu_hover_background_color,
                base.dropdown.menu_hover_background,
            ),
            menu_hover_text: color(&style.menu_hover_text_color, base.dropdown.menu_hover_text),
            menu_radius: length(style.menu_border_radius),
        },
        expand: ExpandButtonStyle {
            background: color(
                &style.expand_button_background_color,
                base.expand.background,
            ),
            icon: color(&style.expand_button_icon_color, base.expand.icon),
            radius: length(style.expand_button_border_radius),
        },
        popup: PopupStyle {
            background: color(&style.popup_background_color, base.popup.background),
            radius: length(style.popup_border_radius),
            gap: length(style.popup_gap),
            padding: length(style.popup_padding),
            item_padding: length(style.popup_item_padding),
            backdrop: color(&style.backdrop_color, base.popup.backdrop),
            shadow: Shadow {
                color: color(&style.shadow_color, base.popup.shadow.color),
                offset: Vector {
                    x: style.shadow_offset_x as f32,
                    y: style.shadow_offset_y as f32,
                },
                blur_radius: length(style.shadow_blur),
            },
            marker_background: color(
                &style.marker_background_color,
                base.popup.marker_background,
            ),
            marker_text: color(&style.marker_text_color, base.popup.marker_text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theming::ThemeMode;

    fn themes() -> (AppTheme, AppTheme) {
        (AppTheme::new(ThemeMode::Light), AppTheme::new(ThemeMode::Dark))
    }

    #[test]
    fn theme_mode_follows_the_color_scheme() {
        let (light, dark) = themes();
        let style = StyleConfig::default();

        let light_sheet = resolve(&style, &light);
        let dark_sheet = resolve(&style, &dark);

        assert_eq!(
            light_sheet.dropdown.button_background,
            light.colors.surface_secondary
        );
        assert_ne!(
            light_sheet.dropdown.button_background,
            dark_sheet.dropdown.button_background
        );
    }

    #[test]
    fn custom_mode_is_independent_of_theme() {
        let (light, dark) = themes();
        let mut style = StyleConfig::default();
        style.use_advanced = true;
        style.widget_background_color = "#123456".into();

        let light_sheet = resolve(&style, &light);
        let dark_sheet = resolve(&style, &dark);

        let expected = css_color::parse("#123456").unwrap();
        assert_eq!(light_sheet.widget.background, expected);
        assert_eq!(dark_sheet.widget.background, expected);
    }

    #[test]
    fn custom_mode_reads_numeric_fields() {
        let (light, _) = themes();
        let mut style = StyleConfig::default();
        style.use_advanced = true;
        style.popup_gap = 20;
        style.popup_border_radius = 14;
        style.shadow_offset_y = -3;

        let sheet = resolve(&style, &light);
        assert_eq!(sheet.popup.gap, 20.0);
        assert_eq!(sheet.popup.radius, 14.0);
        assert_eq!(sheet.popup.shadow.offset.y, -3.0);
    }

    #[test]
    fn negative_lengths_clamp_to_zero() {
        let (light, _) = themes();
        let mut style = StyleConfig::default();
        style.use_advanced = true;
        style.popup_gap = -5;

        let sheet = resolve(&style, &light);
        assert_eq!(sheet.popup.gap, 0.0);
    }

    #[test]
    fn unparsable_color_falls_back_to_theme_value() {
        let (light, _) = themes();
        let mut style = StyleConfig::default();
        style.use_advanced = true;
        style.dropdown_text_color = "#12".into();

        let sheet = resolve(&style, &light);
        let base = resolve(&StyleConfig::default(), &light);
        assert_eq!(sheet.dropdown.button_text, base.dropdown.button_text);
    }

    #[test]
    fn resolve_is_deterministic() {
        let (light, _) = themes();
        let mut style = StyleConfig::default();
        style.use_advanced = true;
        style.menu_hover_background_color = "rgba(10, 20, 30, 0.5)".into();

        assert_eq!(resolve(&style, &light), resolve(&style, &light));
    }

    #[test]
    fn disabling_advanced_ignores_custom_fields() {
        let (light, _) = themes();
        let mut style = StyleConfig::default();
        style.use_advanced = false;
        style.widget_background_color = "#123456".into();

        let sheet = resolve(&style, &light);
        assert_eq!(sheet, resolve(&StyleConfig::default(), &light));
    }
}
