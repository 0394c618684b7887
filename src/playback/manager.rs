// SPDX-License-Identifier: MPL-2.0
//! Playback session lifecycle management.
//!
//! The [`SessionManager`] is the resource-handle table for playback
//! sessions, keyed by surface identity. It is the sole mutator of surface
//! ownership: at most one live session exists per surface, and a session is
//! always released before another one may claim the same surface.
//!
//! The manager tracks the desired bindings; actual decoding runs inside the
//! per-session Iced subscriptions derived from this table (see
//! [`super::subscription`]). Once a subscription starts it hands back a
//! command sender, which the manager uses to start playback and to stop the
//! decoder synchronously on teardown.

use crate::error::StreamError;
use crate::playback::subscription::DecoderCommandSender;
use crate::playback::{DecoderCommand, StreamKind, SurfaceId};
use std::collections::HashMap;

/// Displayable state of one playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Subscription not started yet, or stream still opening.
    Pending,
    /// Frames are being delivered.
    Playing,
    /// Attached but paused (autoplay disabled, or paused by the user).
    Paused,
    /// The stream ended.
    Ended,
    /// The stream failed; non-fatal, shown on the owning surface.
    Failed(StreamError),
}

/// The live binding between a feed URL and a surface.
#[derive(Debug, Clone)]
pub struct Session {
    url: String,
    kind: StreamKind,
    generation: u64,
    sender: Option<DecoderCommandSender>,
    state: SessionState,
}

impl Session {
    /// The decorated URL this session plays.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stream kind detected from the URL.
    #[must_use]
    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Attach generation; unique per (surface, attach) so subscriptions are
    /// recreated when a surface is rebound, and stable while the binding is
    /// unchanged.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn stop(&mut self) {
        if let Some(sender) = self.sender.take() {
            // The subscription disappears with the session record; this stop
            // makes the decoder release its resources without waiting for
            // the channel to close.
            let _ = sender.send(DecoderCommand::Stop);
        }
    }
}

/// Summary of what a [`SessionManager::resync`] call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResyncReport {
    /// Sessions left untouched because their (url, surface) pair matched.
    pub kept: usize,
    /// Sessions newly attached.
    pub attached: usize,
    /// Sessions destroyed.
    pub detached: usize,
}

/// Resource-handle table for playback sessions, keyed by surface.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<SurfaceId, Session>,
    autoplay: bool,
    next_generation: u64,
}

impl SessionManager {
    /// Creates an empty manager with the given autoplay policy.
    #[must_use]
    pub fn new(autoplay: bool) -> Self {
        Self {
            sessions: HashMap::new(),
            autoplay,
            next_generation: 0,
        }
    }

    /// Updates the autoplay policy for sessions attached from now on.
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Attaches `url` to `surface`.
    ///
    /// A silent no-op when the surface is already owned or the URL is empty;
    /// the widget must tolerate partially-configured states. Returns whether
    /// a session was created.
    pub fn attach(&mut self, url: &str, surface: SurfaceId) -> bool {
        if url.is_empty() || self.sessions.contains_key(&surface) {
            return false;
        }

        self.next_generation += 1;
        self.sessions.insert(
            surface,
            Session {
                url: url.to_string(),
                kind: StreamKind::from_url(url),
                generation: self.next_generation,
                sender: None,
                state: SessionState::Pending,
            },
        );
        true
    }

    /// Destroys the session owned by `surface`, releasing its decoder.
    /// Idempotent: detaching an unattached surface is a no-op.
    pub fn detach(&mut self, surface: SurfaceId) {
        if let Some(mut session) = self.sessions.remove(&surface) {
            session.stop();
        }
    }

    /// Destroys every grid session, leaving the primary binding alone.
    pub fn detach_grid(&mut self) {
        let grid_surfaces: Vec<SurfaceId> = self
            .sessions
            .keys()
            .copied()
            .filter(|surface| matches!(surface, SurfaceId::Grid(_)))
            .collect();
        for surface in grid_surfaces {
            self.detach(surface);
        }
    }

    /// Destroys every session.
    pub fn detach_all(&mut self) {
        let surfaces: Vec<SurfaceId> = self.sessions.keys().copied().collect();
        for surface in surfaces {
            self.detach(surface);
        }
    }

    /// Reconciles the session table against the desired (surface, url)
    /// pairing: stale sessions are destroyed, matching ones are kept as-is
    /// (no destroy/recreate churn), missing ones are attached.
    pub fn resync(&mut self, desired: &[(SurfaceId, String)]) -> ResyncReport {
        let mut report = ResyncReport::default();

        // Destroy sessions that are not part of the desired pairing
        let stale: Vec<SurfaceId> = self
            .sessions
            .iter()
            .filter(|(surface, session)| {
                !desired
                    .iter()
                    .any(|(s, url)| s == *surface && url == session.url())
            })
            .map(|(surface, _)| *surface)
            .collect();
        report.detached = stale.len();
        for surface in stale {
            self.detach(surface);
        }

        // Attach what is missing; unchanged pairs stay untouched
        for (surface, url) in desired {
            if self.sessions.contains_key(surface) {
                report.kept += 1;
            } else if self.attach(url, *surface) {
                report.attached += 1;
            }
        }

        report
    }

    /// Called when a session's subscription has started and handed over its
    /// command sender. Starts playback unless autoplay is disallowed, in
    /// which case the session stays paused and a warning is logged.
    pub fn on_started(&mut self, surface: SurfaceId, sender: DecoderCommandSender) {
        let autoplay = self.autoplay;
        if let Some(session) = self.sessions.get_mut(&surface) {
            if autoplay {
                if sender.send(DecoderCommand::Play).is_ok() {
                    session.state = SessionState::Playing;
                } else {
                    eprintln!("Playback could not be started for {surface:?}");
                }
            } else {
                eprintln!("Autoplay is disabled; feed stays paused until started manually.");
                session.state = SessionState::Paused;
            }
            session.sender = Some(sender);
        }
    }

    /// Called when a session's stream failed. Non-fatal: the state is kept
    /// for display on the owning surface.
    pub fn on_error(&mut self, surface: SurfaceId, message: &str) {
        if let Some(session) = self.sessions.get_mut(&surface) {
            session.state = SessionState::Failed(StreamError::from_message(message));
        }
    }

    /// Called when a session's stream reached its end.
    pub fn on_ended(&mut self, surface: SurfaceId) {
        if let Some(session) = self.sessions.get_mut(&surface) {
            session.state = SessionState::Ended;
        }
    }

    /// Toggles play/pause on the session owning `surface`. A no-op for
    /// pending, failed, or unattached surfaces.
    pub fn toggle_playback(&mut self, surface: SurfaceId) {
        if let Some(session) = self.sessions.get_mut(&surface) {
            let Some(sender) = session.sender.clone() else {
                return;
            };
            match session.state {
                SessionState::Playing => {
                    if sender.send(DecoderCommand::Pause).is_ok() {
                        session.state = SessionState::Paused;
                    }
                }
                SessionState::Paused => {
                    if sender.send(DecoderCommand::Play).is_ok() {
                        session.state = SessionState::Playing;
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns the session owning `surface`, if any.
    #[must_use]
    pub fn session(&self, surface: SurfaceId) -> Option<&Session> {
        self.sessions.get(&surface)
    }

    /// Iterates over all live sessions.
    pub fn sessions(&self) -> impl Iterator<Item = (SurfaceId, &Session)> {
        self.sessions.iter().map(|(surface, session)| (*surface, session))
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
