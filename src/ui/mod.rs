// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based
//! architecture with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`viewer`] - Feed display with dropdown selection and grid overlay
//! - [`settings`] - Feed list and style configuration editor
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Style resolution (theme-derived or custom)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod settings;
pub mod styles;
pub mod theming;
pub mod viewer;
