// SPDX-License-Identifier: MPL-2.0
//! Centralized styling for the feed widget.
//!
//! [`css_color`] parses the CSS color strings stored in the configuration;
//! [`resolve`] turns configuration + theme into a render-time [`StyleSheet`].

pub mod css_color;
pub mod resolve;

pub use resolve::{resolve, DropdownStyle, ExpandButtonStyle, PopupStyle, StyleSheet, WidgetStyle};
