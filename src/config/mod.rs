// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration: the ordered feed
//! list, playback options, and widget styling, persisted to a `feeds.toml`
//! file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[playback]` - Autoplay policy and authentication query string
//! - `[[feeds]]` - Ordered list of named feed URLs
//! - `[style]` - Advanced-styling flag and visual style fields
//!
//! # Mutation Model
//!
//! The configuration is immutable-on-write: every edit goes through
//! [`Config::apply`], which returns a fresh value with one field changed.
//! The settings screen publishes patches; nothing mutates a shared `Config`
//! in place.
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `ICED_FEEDWALL_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_feedwall::config::{self, ConfigPatch};
//!
//! let (config, _warning) = config::load();
//! let config = config.apply(ConfigPatch::AddFeed);
//! let config = config.apply(ConfigPatch::RenameFeed(0, "Lobby".into()));
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "feeds.toml";
const APP_DIR: &str = "IcedFeedwall";

/// Environment variable overriding the config directory (used by tests and
/// portable installs).
pub const CONFIG_DIR_ENV: &str = "ICED_FEEDWALL_CONFIG_DIR";

// =============================================================================
// Feed
// =============================================================================

/// A single configured video feed. Identity is the position in the feed list;
/// there is no stable ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feed {
    /// Display name shown in the dropdown and on grid-cell markers.
    #[serde(default)]
    pub name: String,

    /// Stream URL (HLS manifest or progressive media).
    #[serde(default)]
    pub url: String,
}

impl Feed {
    /// A feed is selectable from the dropdown only when both fields are set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.url.is_empty()
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Playback policy settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Whether attached feeds start playing immediately. When disabled,
    /// sessions stay paused until the user starts them.
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Query string appended to all manifest and media requests.
    #[serde(default)]
    pub auth_query_string: String,
}

fn default_autoplay() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            auth_query_string: String::new(),
        }
    }
}

// =============================================================================
// Style Fields
// =============================================================================

/// Color-valued style fields editable on the settings screen.
///
/// Values are CSS color strings; parsing happens at style-resolution time and
/// falls back to the theme value when a string does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    WidgetBackground,
    WidgetBorder,
    DropdownBackground,
    DropdownText,
    DropdownArrow,
    MenuBackground,
    MenuText,
    MenuHoverBackground,
    MenuHoverText,
    ExpandButtonBackground,
    ExpandButtonIcon,
    PopupBackground,
    Backdrop,
    ShadowColor,
    MarkerBackground,
    MarkerText,
}

/// Integer-valued style fields (radii, spacing, shadow geometry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    DropdownRadius,
    MenuRadius,
    ExpandButtonRadius,
    PopupRadius,
    PopupGap,
    PopupPadding,
    PopupItemPadding,
    ShadowOffsetX,
    ShadowOffsetY,
    ShadowBlur,
}

/// Visual style settings for the widget.
///
/// The fields only take effect when `use_advanced` is set; otherwise the
/// stylesheet is derived entirely from the application theme. The schema is
/// additive: fields absent from an older config file fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleConfig {
    /// Whether custom styling is active (false = theme-derived styling).
    #[serde(default)]
    pub use_advanced: bool,

    #[serde(default = "d_widget_background")]
    pub widget_background_color: String,
    #[serde(default = "d_widget_border")]
    pub widget_border_color: String,

    #[serde(default = "d_dropdown_background")]
    pub dropdown_background_color: String,
    #[serde(default = "d_dropdown_text")]
    pub dropdown_text_color: String,
    #[serde(default = "d_dropdown_arrow")]
    pub dropdown_arrow_color: String,
    #[serde(default = "d_dropdown_radius")]
    pub dropdown_border_radius: i32,

    #[serde(default = "d_menu_background")]
    pub menu_background_color: String,
    #[serde(default = "d_menu_text")]
    pub menu_text_color: String,
    #[serde(default = "d_menu_hover_background")]
    pub menu_hover_background_color: String,
    #[serde(default = "d_menu_hover_text")]
    pub menu_hover_text_color: String,
    #[serde(default = "d_menu_radius")]
    pub menu_border_radius: i32,

    #[serde(default = "d_expand_background")]
    pub expand_button_background_color: String,
    #[serde(default = "d_expand_icon")]
    pub expand_button_icon_color: String,
    #[serde(default = "d_expand_radius")]
    pub expand_button_border_radius: i32,

    #[serde(default = "d_popup_background")]
    pub popup_background_color: String,
    #[serde(default = "d_popup_radius")]
    pub popup_border_radius: i32,
    #[serde(default = "d_popup_gap")]
    pub popup_gap: i32,
    #[serde(default = "d_popup_padding")]
    pub popup_padding: i32,
    #[serde(default = "d_popup_item_padding")]
    pub popup_item_padding: i32,

    #[serde(default = "d_backdrop")]
    pub backdrop_color: String,
    #[serde(default = "d_shadow_color")]
    pub shadow_color: String,
    #[serde(default = "d_shadow_offset_x")]
    pub shadow_offset_x: i32,
    #[serde(default = "d_shadow_offset_y")]
    pub shadow_offset_y: i32,
    #[serde(default = "d_shadow_blur")]
    pub shadow_blur: i32,

    #[serde(default = "d_marker_background")]
    pub marker_background_color: String,
    #[serde(default = "d_marker_text")]
    pub marker_text_color: String,
}

// Per-field serde defaults. TOML deserialization applies these when a field
// is missing, which keeps the schema additive across revisions.
fn d_widget_background() -> String {
    WIDGET_BACKGROUND_COLOR.into()
}
fn d_widget_border() -> String {
    WIDGET_BORDER_COLOR.into()
}
fn d_dropdown_background() -> String {
    DROPDOWN_BACKGROUND_COLOR.into()
}
fn d_dropdown_text() -> String {
    DROPDOWN_TEXT_COLOR.into()
}
fn d_dropdown_arrow() -> String {
    DROPDOWN_ARROW_COLOR.into()
}
fn d_dropdown_radius() -> i32 {
    i32::from(DROPDOWN_BORDER_RADIUS)
}
fn d_menu_background() -> String {
    MENU_BACKGROUND_COLOR.into()
}
fn d_menu_text() -> String {
    MENU_TEXT_COLOR.into()
}
fn d_menu_hover_background() -> String {
    MENU_HOVER_BACKGROUND_COLOR.into()
}
fn d_menu_hover_text() -> String {
    MENU_HOVER_TEXT_COLOR.into()
}
fn d_menu_radius() -> i32 {
    i32::from(MENU_BORDER_RADIUS)
}
fn d_expand_background() -> String {
    EXPAND_BUTTON_BACKGROUND_COLOR.into()
}
fn d_expand_icon() -> String {
    EXPAND_BUTTON_ICON_COLOR.into()
}
fn d_expand_radius() -> i32 {
    i32::from(EXPAND_BUTTON_BORDER_RADIUS)
}
fn d_popup_background() -> String {
    POPUP_BACKGROUND_COLOR.into()
}
fn d_popup_radius() -> i32 {
    i32::from(POPUP_BORDER_RADIUS)
}
fn d_popup_gap() -> i32 {
    i32::from(POPUP_GAP)
}
fn d_popup_padding() -> i32 {
    i32::from(POPUP_PADDING)
}
fn d_popup_item_padding() -> i32 {
    i32::from(POPUP_ITEM_PADDING)
}
fn d_backdrop() -> String {
    BACKDROP_COLOR.into()
}
fn d_shadow_color() -> String {
    SHADOW_COLOR.into()
}
fn d_shadow_offset_x() -> i32 {
    i32::from(SHADOW_OFFSET_X)
}
fn d_shadow_offset_y() -> i32 {
    i32::from(SHADOW_OFFSET_Y)
}
fn d_shadow_blur() -> i32 {
    i32::from(SHADOW_BLUR)
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            use_advanced: false,
            widget_background_color: d_widget_background(),
            widget_border_color: d_widget_border(),
            dropdown_background_color: d_dropdown_background(),
            dropdown_text_color: d_dropdown_text(),
            dropdown_arrow_color: d_dropdown_arrow(),
            dropdown_border_radius: d_dropdown_radius(),
            menu_background_color: d_menu_background(),
            menu_text_color: d_menu_text(),
            menu_hover_background_color: d_menu_hover_background(),
            menu_hover_text_color: d_menu_hover_text(),
            menu_border_radius: d_menu_radius(),
            expand_button_background_color: d_expand_background(),
            expand_button_icon_color: d_expand_icon(),
            expand_button_border_radius: d_expand_radius(),
            popup_background_color: d_popup_background(),
            popup_border_radius: d_popup_radius(),
            popup_gap: d_popup_gap(),
            popup_padding: d_popup_padding(),
            popup_item_padding: d_popup_item_padding(),
            backdrop_color: d_backdrop(),
            shadow_color: d_shadow_color(),
            shadow_offset_x: d_shadow_offset_x(),
            shadow_offset_y: d_shadow_offset_y(),
            shadow_blur: d_shadow_blur(),
            marker_background_color: d_marker_background(),
            marker_text_color: d_marker_text(),
        }
    }
}

impl StyleConfig {
    /// Returns the current value of a color field.
    #[must_use]
    pub fn color(&self, field: ColorField) -> &str {
        match field {
            ColorField::WidgetBackground => &self.widget_background_color,
            ColorField::WidgetBorder => &self.widget_border_color,
            ColorField::DropdownBackground => &self.dropdown_background_color,
            ColorField::DropdownText => &self.dropdown_text_color,
            ColorField::DropdownArrow => &self.dropdown_arrow_color,
            ColorField::MenuBackground => &self.menu_background_color,
            ColorField::MenuText => &self.menu_text_color,
            ColorField::MenuHoverBackground => &self.menu_hover_background_color,
            ColorField::MenuHoverText => &self.menu_hover_text_color,
            ColorField::ExpandButtonBackground => &self.expand_button_background_color,
            ColorField::ExpandButtonIcon => &self.expand_button_icon_color,
            ColorField::PopupBackground => &self.popup_background_color,
            ColorField::Backdrop => &self.backdrop_color,
            ColorField::ShadowColor => &self.shadow_color,
            ColorField::MarkerBackground => &self.marker_background_color,
            ColorField::MarkerText => &self.marker_text_color,
        }
    }

    fn set_color(&mut self, field: ColorField, value: String) {
        match field {
            ColorField::WidgetBackground => self.widget_background_color = value,
            ColorField::WidgetBorder => self.widget_border_color = value,
            ColorField::DropdownBackground => self.dropdown_background_color = value,
            ColorField::DropdownText => self.dropdown_text_color = value,
            ColorField::DropdownArrow => self.dropdown_arrow_color = value,
            ColorField::MenuBackground => self.menu_background_color = value,
            ColorField::MenuText => self.menu_text_color = value,
            ColorField::MenuHoverBackground => self.menu_hover_background_color = value,
            ColorField::MenuHoverText => self.menu_hover_text_color = value,
            ColorField::ExpandButtonBackground => self.expand_button_background_color = value,
            ColorField::ExpandButtonIcon => self.expand_button_icon_color = value,
            ColorField::PopupBackground => self.popup_background_color = value,
            ColorField::Backdrop => self.backdrop_color = value,
            ColorField::ShadowColor => self.shadow_color = value,
            ColorField::MarkerBackground => self.marker_background_color = value,
            ColorField::MarkerText => self.marker_text_color = value,
        }
    }

    /// Returns the current value of a numeric field.
    #[must_use]
    pub fn number(&self, field: NumberField) -> i32 {
        match field {
            NumberField::DropdownRadius => self.dropdown_border_radius,
            NumberField::MenuRadius => self.menu_border_radius,
            NumberField::ExpandButtonRadius => self.expand_button_border_radius,
            NumberField::PopupRadius => self.popup_border_radius,
            NumberField::PopupGap => self.popup_gap,
            NumberField::PopupPadding => self.popup_padding,
            NumberField::PopupItemPadding => self.popup_item_padding,
            NumberField::ShadowOffsetX => self.shadow_offset_x,
            NumberField::ShadowOffsetY => self.shadow_offset_y,
            NumberField::ShadowBlur => self.shadow_blur,
        }
    }

    fn set_number(&mut self, field: NumberField, value: i32) {
        match field {
            NumberField::DropdownRadius => self.dropdown_border_radius = value,
            NumberField::MenuRadius => self.menu_border_radius = value,
            NumberField::ExpandButtonRadius => self.expand_button_border_radius = value,
            NumberField::PopupRadius => self.popup_border_radius = value,
            NumberField::PopupGap => self.popup_gap = value,
            NumberField::PopupPadding => self.popup_padding = value,
            NumberField::PopupItemPadding => self.popup_item_padding = value,
            NumberField::ShadowOffsetX => self.shadow_offset_x = value,
            NumberField::ShadowOffsetY => self.shadow_offset_y = value,
            NumberField::ShadowBlur => self.shadow_blur = value,
        }
    }
}

// =============================================================================
// Config Root
// =============================================================================

/// Root configuration value. Replaced wholesale on every edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Ordered feed list. List order is display order and selection index.
    #[serde(default)]
    pub feeds: Vec<Feed>,

    #[serde(default)]
    pub style: StyleConfig,
}

/// A single configuration edit. Applying a patch produces a new `Config`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigPatch {
    /// Append an empty feed to the list.
    AddFeed,
    /// Remove the feed at `index`. Out-of-range indices are a no-op.
    RemoveFeed(usize),
    /// Rename the feed at `index`. Out-of-range indices are a no-op.
    RenameFeed(usize, String),
    /// Change the URL of the feed at `index`. Out-of-range is a no-op.
    SetFeedUrl(usize, String),
    /// Replace the authentication query string.
    SetAuthQuery(String),
    /// Toggle the autoplay policy.
    SetAutoplay(bool),
    /// Toggle advanced (custom) styling.
    SetAdvancedStyles(bool),
    /// Set a color-valued style field.
    SetColor(ColorField, String),
    /// Set an integer-valued style field.
    SetNumber(NumberField, i32),
    /// Select the theme mode.
    SetThemeMode(ThemeMode),
}

impl Config {
    /// Applies a single edit, returning a new configuration value. The
    /// receiver is left untouched; callers replace their copy with the
    /// returned one.
    #[must_use]
    pub fn apply(&self, patch: ConfigPatch) -> Config {
        let mut next = self.clone();
        match patch {
            ConfigPatch::AddFeed => next.feeds.push(Feed::default()),
            ConfigPatch::RemoveFeed(index) => {
                if index < next.feeds.len() {
                    next.feeds.remove(index);
                }
            }
            ConfigPatch::RenameFeed(index, name) => {
                if let Some(feed) = next.feeds.get_mut(index) {
                    feed.name = name;
                }
            }
            ConfigPatch::SetFeedUrl(index, url) => {
                if let Some(feed) = next.feeds.get_mut(index) {
                    feed.url = url;
                }
            }
            ConfigPatch::SetAuthQuery(query) => next.playback.auth_query_string = query,
            ConfigPatch::SetAutoplay(enabled) => next.playback.autoplay = enabled,
            ConfigPatch::SetAdvancedStyles(enabled) => next.style.use_advanced = enabled,
            ConfigPatch::SetColor(field, value) => next.style.set_color(field, value),
            ConfigPatch::SetNumber(field, value) => next.style.set_number(field, value),
            ConfigPatch::SetThemeMode(mode) => next.general.theme_mode = mode,
        }
        next
    }
}

// =============================================================================
// Persistence
// =============================================================================

fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path
    })
}

fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Never fails: a missing file yields the defaults, and an unreadable or
/// invalid file yields the defaults plus a notification key the caller can
/// surface as a warning.
#[must_use]
pub fn load() -> (Config, Option<&'static str>) {
    let Some(path) = default_config_path() else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(_) => (Config::default(), Some("notification-config-load-warning")),
    }
}

/// Saves the configuration to the default location.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads the configuration from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to an explicit path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or the filesystem write fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_with_feeds(urls: &[&str]) -> Config {
        let mut config = Config::default();
        for (i, url) in urls.iter().enumerate() {
            config.feeds.push(Feed {
                name: format!("Feed {}", i + 1),
                url: (*url).to_string(),
            });
        }
        config
    }

    #[test]
    fn save_and_load_round_trip_preserves_feeds() {
        let config = config_with_feeds(&["https://cams.example/a.m3u8", "https://x.example/b.mp4"]);
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("feeds.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_errors_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("feeds.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn missing_style_section_falls_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("feeds.toml");
        fs::write(&config_path, "[[feeds]]\nname = \"Cam\"\nurl = \"a.m3u8\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded.style, StyleConfig::default());
        assert!(loaded.playback.autoplay);
        assert_eq!(loaded.feeds.len(), 1);
    }

    #[test]
    fn partial_style_section_keeps_field_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("feeds.toml");
        fs::write(
            &config_path,
            "[style]\nuse_advanced = true\nwidget_background_color = \"#123456\"\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load failed");
        assert!(loaded.style.use_advanced);
        assert_eq!(loaded.style.widget_background_color, "#123456");
        assert_eq!(loaded.style.popup_gap, i32::from(POPUP_GAP));
        assert_eq!(loaded.style.marker_text_color, MARKER_TEXT_COLOR);
    }

    #[test]
    fn apply_returns_new_value_and_leaves_original_untouched() {
        let config = config_with_feeds(&["a.m3u8"]);
        let next = config.apply(ConfigPatch::RenameFeed(0, "Renamed".into()));

        assert_eq!(config.feeds[0].name, "Feed 1");
        assert_eq!(next.feeds[0].name, "Renamed");
    }

    #[test]
    fn add_then_remove_last_restores_prior_list() {
        let config = config_with_feeds(&["a.m3u8", "b.mp4"]);
        let grown = config.apply(ConfigPatch::AddFeed);
        assert_eq!(grown.feeds.len(), 3);

        let restored = grown.apply(ConfigPatch::RemoveFeed(2));
        assert_eq!(restored.feeds, config.feeds);
    }

    #[test]
    fn remove_feed_out_of_range_is_a_no_op() {
        let config = config_with_feeds(&["a.m3u8"]);
        let next = config.apply(ConfigPatch::RemoveFeed(5));
        assert_eq!(next, config);
    }

    #[test]
    fn rename_and_set_url_out_of_range_are_no_ops() {
        let config = config_with_feeds(&["a.m3u8"]);
        let next = config
            .apply(ConfigPatch::RenameFeed(9, "x".into()))
            .apply(ConfigPatch::SetFeedUrl(9, "y".into()));
        assert_eq!(next, config);
    }

    #[test]
    fn set_color_and_number_fields() {
        let config = Config::default();
        let next = config
            .apply(ConfigPatch::SetColor(
                ColorField::PopupBackground,
                "#222222".into(),
            ))
            .apply(ConfigPatch::SetNumber(NumberField::PopupGap, 12));

        assert_eq!(next.style.color(ColorField::PopupBackground), "#222222");
        assert_eq!(next.style.number(NumberField::PopupGap), 12);
        // untouched sibling fields keep their defaults
        assert_eq!(
            next.style.color(ColorField::WidgetBackground),
            WIDGET_BACKGROUND_COLOR
        );
    }

    #[test]
    fn feed_completeness_requires_name_and_url() {
        assert!(!Feed::default().is_complete());
        assert!(!Feed {
            name: "Cam".into(),
            url: String::new()
        }
        .is_complete());
        assert!(Feed {
            name: "Cam".into(),
            url: "a.m3u8".into()
        }
        .is_complete());
    }
}
