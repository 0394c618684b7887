// SPDX-License-Identifier: MPL-2.0
//! `iced_feedwall` is a multi-feed streaming video viewer built with the Iced
//! GUI framework.
//!
//! It renders one primary video feed (HLS or progressive), lets the user
//! switch feeds via a dropdown, and expands into a grid overlay showing all
//! feeds at once. Feed URLs and visual styling are edited on a settings
//! screen and persisted to a TOML configuration file.

#![doc(html_root_url = "https://docs.rs/iced_feedwall/0.2.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod playback;
pub mod ui;
