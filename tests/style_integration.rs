// SPDX-License-Identifier: MPL-2.0
//! Integration tests to validate style and design token coherence.

#[cfg(test)]
mod tests {
    use iced_feedwall::config::{ColorField, Config, ConfigPatch, StyleConfig};
    use iced_feedwall::ui::design_tokens::{opacity, palette, sizing, spacing};
    use iced_feedwall::ui::styles::{self, css_color};
    use iced_feedwall::ui::theming::{AppTheme, ColorScheme, ThemeMode};

    #[test]
    fn design_tokens_are_accessible() {
        // Palette
        let _ = palette::PRIMARY_500;
        let _ = palette::WHITE;

        // Spacing
        let _ = spacing::MD;

        // Opacity
        let _ = opacity::OVERLAY_STRONG;

        // Sizing
        let _ = sizing::DROPDOWN_WIDTH;
    }

    #[test]
    fn theming_switches_correctly() {
        let light = AppTheme::new(ThemeMode::Light);
        let dark = AppTheme::new(ThemeMode::Dark);

        // Surface colors should be visually opposite between light and dark
        assert!(light.colors.surface_primary.r > dark.colors.surface_primary.r);

        // Text colors should also be opposite between light and dark
        assert!(light.colors.text_primary.r < dark.colors.text_primary.r);
    }

    #[test]
    fn theme_mode_stylesheet_tracks_the_scheme() {
        let theme = AppTheme {
            colors: ColorScheme::dark(),
            mode: ThemeMode::Dark,
        };
        let sheet = styles::resolve(&StyleConfig::default(), &theme);

        assert_eq!(
            sheet.dropdown.button_background,
            theme.colors.surface_secondary
        );
        assert_eq!(sheet.popup.background, theme.colors.surface_primary);
    }

    #[test]
    fn custom_background_color_wins_over_any_theme() {
        let mut style = StyleConfig::default();
        style.use_advanced = true;
        style.widget_background_color = "#123456".into();
        let expected = css_color::parse("#123456").unwrap();

        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let sheet = styles::resolve(&style, &AppTheme::new(mode));
            assert_eq!(sheet.widget.background, expected);
        }
    }

    #[test]
    fn style_edits_flow_from_config_patches_into_the_sheet() {
        let config = Config::default()
            .apply(ConfigPatch::SetAdvancedStyles(true))
            .apply(ConfigPatch::SetColor(
                ColorField::MarkerBackground,
                "rgba(0, 0, 0, 0.8)".into(),
            ));

        let sheet = styles::resolve(&config.style, &AppTheme::new(ThemeMode::Dark));
        let expected = css_color::parse("rgba(0, 0, 0, 0.8)").unwrap();
        assert_eq!(sheet.popup.marker_background, expected);
    }

    #[test]
    fn resolution_has_no_memory_between_calls() {
        let theme = AppTheme::new(ThemeMode::Dark);

        let mut custom = StyleConfig::default();
        custom.use_advanced = true;
        custom.popup_gap = 42;
        let first = styles::resolve(&custom, &theme);

        // A different input must not be influenced by the previous call
        let second = styles::resolve(&StyleConfig::default(), &theme);
        assert_ne!(first.popup.gap, second.popup.gap);

        // And the same input resolves identically again
        assert_eq!(styles::resolve(&custom, &theme), first);
    }
}
