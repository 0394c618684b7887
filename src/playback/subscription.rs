// SPDX-License-Identifier: MPL-2.0
//! Iced subscriptions for feed playback events.
//!
//! One subscription runs per live session, keyed by surface and attach
//! generation. Each subscription owns its decoder: when the session record
//! disappears from the manager, the subscription is dropped by the runtime
//! and the decoder shuts down with it. The subscription hands the UI a
//! command sender on start so pause/play/stop can be driven from the event
//! loop.

use crate::playback::{AsyncDecoder, DecoderCommand, DecoderEvent, SurfaceId};
use iced::futures::SinkExt;
use iced::stream;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Subscription ID for one playback session.
///
/// The generation changes on every (re)attach of a surface, forcing the
/// runtime to tear down the old stream and start a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedPlaybackId {
    surface: SurfaceId,
    generation: u64,
}

/// Handle for sending commands to a session's decoder from the UI.
#[derive(Clone)]
pub struct DecoderCommandSender {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderCommandSender {
    /// Wraps a raw decoder command channel.
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<DecoderCommand>) -> Self {
        Self { tx }
    }

    /// Sends a command to the decoder.
    ///
    /// # Errors
    ///
    /// Returns an error when the decoder task has terminated.
    pub fn send(&self, command: DecoderCommand) -> Result<(), String> {
        self.tx
            .send(command)
            .map_err(|_| "Decoder not running".to_string())
    }
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender").finish()
    }
}

/// A playback event tagged with the surface it belongs to.
#[derive(Debug, Clone)]
pub struct PlaybackMessage {
    /// Surface whose session produced the event.
    pub surface: SurfaceId,
    /// The event itself.
    pub event: PlaybackEvent,
}

/// Events emitted by a feed playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// Subscription started; provides the command sender for this session.
    Started(DecoderCommandSender),

    /// The stream was opened (manifest parsed, for adaptive streams).
    Opened {
        /// Native stream width.
        width: u32,
        /// Native stream height.
        height: u32,
    },

    /// A new frame is ready for display.
    FrameReady {
        /// RGBA pixel data.
        rgba_data: Arc<Vec<u8>>,
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
        /// Presentation timestamp in seconds.
        pts_secs: f64,
    },

    /// Decoder is buffering.
    Buffering,

    /// Playback reached the end of the stream.
    EndOfStream,

    /// An error occurred; non-fatal, surfaced on the owning cell.
    Error(String),
}

/// Creates the playback subscription for one session.
///
/// The decoder is created inside the stream so its lifetime is tied to the
/// subscription: dropping the subscription (session detached, surface
/// rebound) drops the decoder, whose command channel closing stops the
/// decode loop.
pub fn feed_playback(
    url: String,
    surface: SurfaceId,
    generation: u64,
) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with_id(
        FeedPlaybackId {
            surface,
            generation,
        },
        stream::channel(100, move |mut output| async move {
            let mut decoder = match AsyncDecoder::new(url) {
                Ok(decoder) => decoder,
                Err(e) => {
                    let _ = output
                        .send(PlaybackMessage {
                            surface,
                            event: PlaybackEvent::Error(e.to_string()),
                        })
                        .await;
                    return;
                }
            };

            let sender = DecoderCommandSender::new(decoder.command_sender());
            let _ = output
                .send(PlaybackMessage {
                    surface,
                    event: PlaybackEvent::Started(sender),
                })
                .await;

            while let Some(event) = decoder.recv_event().await {
                let event = match event {
                    DecoderEvent::Opened { width, height } => {
                        PlaybackEvent::Opened { width, height }
                    }
                    DecoderEvent::FrameReady(frame) => PlaybackEvent::FrameReady {
                        rgba_data: frame.rgba_data,
                        width: frame.width,
                        height: frame.height,
                        pts_secs: frame.pts_secs,
                    },
                    DecoderEvent::Buffering => PlaybackEvent::Buffering,
                    DecoderEvent::EndOfStream => PlaybackEvent::EndOfStream,
                    DecoderEvent::Error(message) => PlaybackEvent::Error(message),
                };

                if output.send(PlaybackMessage { surface, event }).await.is_err() {
                    break;
                }
            }
        }),
    )
}
