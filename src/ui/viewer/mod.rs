// SPDX-License-Identifier: MPL-2.0
//! The feed viewer: collapsed primary view and expanded grid overlay.
//!
//! - [`component`] - Orchestrator state, messages, and both layouts
//! - [`selection`] - Feed selection state machine
//! - [`feed_dropdown`] - Feed selector dropdown rendering

pub mod component;
pub mod feed_dropdown;
pub mod selection;
