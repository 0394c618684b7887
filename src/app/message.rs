// SPDX-License-Identifier: MPL-2.0
//! Top-level message and launch-flag types.

use crate::playback::PlaybackMessage;
use crate::ui::{settings, viewer::component};
use std::path::PathBuf;

/// Launch options collected by `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// UI language override (`--lang`).
    pub lang: Option<String>,

    /// Config file override (`--config`), used by tests and portable setups.
    pub config_path: Option<PathBuf>,

    /// Positional stream URLs appended to the configured feed list.
    pub feed_urls: Vec<String>,
}

/// Root application message.
#[derive(Debug, Clone)]
pub enum Message {
    /// Viewer interaction (selection, expand, playback toggle).
    Viewer(component::Message),

    /// Settings form interaction.
    Settings(settings::Message),

    /// Event from one of the playback subscriptions.
    Playback(PlaybackMessage),

    /// Deferred grid attachment fired; stale generations are dropped.
    GridSurfacesReady {
        /// Generation the deferral was scheduled under.
        generation: u64,
    },
}
