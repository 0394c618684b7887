// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Widget**: Base widget surface colors
//! - **Dropdown**: Feed selector button and menu colors/radii
//! - **Expand Button**: Grid-overlay toggle button
//! - **Popup**: Expanded grid overlay geometry and colors

// ==========================================================================
// Widget Defaults
// ==========================================================================

/// Default widget background color (video surfaces sit on black).
pub const WIDGET_BACKGROUND_COLOR: &str = "#000000";

/// Default widget border color.
pub const WIDGET_BORDER_COLOR: &str = "#3c3c3c";

// ==========================================================================
// Dropdown Defaults
// ==========================================================================

/// Default dropdown button background color.
pub const DROPDOWN_BACKGROUND_COLOR: &str = "#1f1f1f";

/// Default dropdown button text color.
pub const DROPDOWN_TEXT_COLOR: &str = "#ffffff";

/// Default dropdown arrow color.
pub const DROPDOWN_ARROW_COLOR: &str = "#ffffff";

/// Default dropdown button border radius in pixels.
pub const DROPDOWN_BORDER_RADIUS: u16 = 2;

/// Default dropdown menu background color.
pub const MENU_BACKGROUND_COLOR: &str = "#1f1f1f";

/// Default dropdown menu item text color.
pub const MENU_TEXT_COLOR: &str = "#e0e0e0";

/// Default dropdown menu item hover background color.
pub const MENU_HOVER_BACKGROUND_COLOR: &str = "#333333";

/// Default dropdown menu item hover text color.
pub const MENU_HOVER_TEXT_COLOR: &str = "#ffffff";

/// Default dropdown menu border radius in pixels.
pub const MENU_BORDER_RADIUS: u16 = 2;

// ==========================================================================
// Expand Button Defaults
// ==========================================================================

/// Default expand button background color.
pub const EXPAND_BUTTON_BACKGROUND_COLOR: &str = "#1f1f1f";

/// Default expand button icon color.
pub const EXPAND_BUTTON_ICON_COLOR: &str = "#ffffff";

/// Default expand button border radius in pixels.
pub const EXPAND_BUTTON_BORDER_RADIUS: u16 = 2;

// ==========================================================================
// Popup (Grid Overlay) Defaults
// ==========================================================================

/// Default popup background color.
pub const POPUP_BACKGROUND_COLOR: &str = "#101010";

/// Default popup border radius in pixels.
pub const POPUP_BORDER_RADIUS: u16 = 8;

/// Default gap between grid cells in pixels.
pub const POPUP_GAP: u16 = 8;

/// Default popup padding in pixels.
pub const POPUP_PADDING: u16 = 16;

/// Default padding inside each grid cell in pixels.
pub const POPUP_ITEM_PADDING: u16 = 4;

/// Default modal backdrop color behind the popup.
pub const BACKDROP_COLOR: &str = "rgba(0, 0, 0, 0.6)";

/// Default popup box-shadow color.
pub const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.5)";

/// Default popup box-shadow horizontal offset in pixels.
pub const SHADOW_OFFSET_X: i16 = 0;

/// Default popup box-shadow vertical offset in pixels.
pub const SHADOW_OFFSET_Y: i16 = 4;

/// Default popup box-shadow blur radius in pixels.
pub const SHADOW_BLUR: u16 = 8;

/// Default feed-name marker background color on grid cells.
pub const MARKER_BACKGROUND_COLOR: &str = "rgba(0, 0, 0, 0.55)";

/// Default feed-name marker text color.
pub const MARKER_TEXT_COLOR: &str = "#ffffff";
