// SPDX-License-Identifier: MPL-2.0
//! Async stream decoder using FFmpeg.
//!
//! This module decodes a feed (HLS manifest or progressive URL) on a blocking
//! Tokio task, delivering RGBA frames through channels for non-blocking UI
//! updates. Opening an adaptive stream blocks inside FFmpeg until the
//! manifest has been fetched and parsed; variant selection and segment
//! fetching stay entirely inside the library.

use crate::error::{Error, Result};
use std::sync::{Arc, Once};
use tokio::sync::mpsc;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with network support and a quiet log level.
///
/// Safe to call multiple times; initialization happens once. The log level
/// is set to ERROR to suppress per-segment HTTP chatter from the HLS demuxer.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // Network protocols (http/https) must be initialized explicitly
        ffmpeg_next::format::network::init();

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

impl DecodedFrame {
    /// Returns the total size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.rgba_data.len()
    }
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone)]
pub enum DecoderCommand {
    /// Start or resume decoding.
    Play,

    /// Pause decoding (stop sending frames).
    Pause,

    /// Stop decoding and clean up resources.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The input was opened. For adaptive streams this means the manifest
    /// was fetched and parsed successfully.
    Opened {
        /// Native stream width in pixels.
        width: u32,
        /// Native stream height in pixels.
        height: u32,
    },

    /// A new frame is ready for display.
    FrameReady(DecodedFrame),

    /// Decoder is buffering (playback starting).
    Buffering,

    /// Playback reached the end of the stream.
    EndOfStream,

    /// An error occurred while opening or decoding.
    Error(String),
}

/// Async stream decoder that runs in a Tokio blocking task.
pub struct AsyncDecoder {
    /// Channel for sending commands to the decoder task.
    command_tx: mpsc::UnboundedSender<DecoderCommand>,

    /// Channel for receiving events from the decoder task.
    /// Bounded so a slow UI applies backpressure instead of accumulating
    /// frames.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Creates a new async decoder for the given feed URL or local path.
    ///
    /// Spawns a Tokio blocking task that opens the input and decodes frames.
    /// Network sources are passed straight to FFmpeg; open failures are
    /// reported through the event channel.
    ///
    /// # Errors
    ///
    /// Returns an error immediately when a local path does not exist. Network
    /// reachability is only known once the task tries to open the input.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();

        // Local files can be validated up front; URLs cannot.
        let is_network = url.contains("://");
        if !is_network && !std::path::Path::new(&url).exists() {
            return Err(Error::Io(format!("Media file not found: {url}")));
        }

        // Commands: unbounded (UI must never block)
        // Events: bounded for backpressure, 2 frames in flight at most
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg types are not Send, so the whole decode loop lives on one
        // blocking thread.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop_blocking(&url, command_rx, &event_tx) {
                eprintln!("Decoder task failed: {}", e);
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    /// Returns a clonable sender for decoder commands.
    #[must_use]
    pub fn command_sender(&self) -> mpsc::UnboundedSender<DecoderCommand> {
        self.command_tx.clone()
    }

    /// Sends a command to the decoder task.
    ///
    /// # Errors
    ///
    /// Returns an error when the decoder task has terminated.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Decoder task is not running".into()))
    }

    /// Receives the next event from the decoder (non-blocking).
    pub fn try_recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receives the next event from the decoder (blocking).
    ///
    /// Returns `None` if the decoder task has terminated.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    /// Main decoder loop running in a blocking thread.
    ///
    /// Opens the input (fetching the manifest for adaptive streams), then
    /// alternates between draining commands and decoding/pacing frames.
    /// Live feeds have no seek path; playback position only moves forward.
    fn decoder_loop_blocking(
        url: &str,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        init_ffmpeg()?;

        // Open input; for .m3u8 this blocks until the manifest is parsed
        let mut ictx = match ffmpeg_next::format::input(&url) {
            Ok(ictx) => ictx,
            Err(e) => {
                let _ = event_tx.blocking_send(DecoderEvent::Error(format!(
                    "Failed to open stream: {e}"
                )));
                return Err(Error::Io(format!("Failed to open stream: {e}")));
            }
        };

        // Find video stream
        let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Video) else {
            let _ = event_tx.blocking_send(DecoderEvent::Error(
                "No video stream found".to_string(),
            ));
            return Err(Error::Io("No video stream found".to_string()));
        };
        let video_stream_index = input.index();

        // Create decoder
        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Io(format!("Failed to create codec context: {}", e)))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Io(format!("Failed to create video decoder: {}", e)))?;

        let width = decoder.width();
        let height = decoder.height();

        // Setup scaler to convert to RGBA
        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Io(format!("Failed to create scaler: {}", e)))?;

        // Extract time base for PTS calculation
        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let _ = event_tx.blocking_send(DecoderEvent::Opened { width, height });

        // Playback state
        let mut is_playing = false;
        let mut playback_start_time: Option<std::time::Instant> = None;
        let mut first_pts: Option<f64> = None;

        // Main loop: process commands and decode frames
        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    is_playing = true;
                    playback_start_time = Some(std::time::Instant::now());
                    first_pts = None;
                    let _ = event_tx.blocking_send(DecoderEvent::Buffering);
                }
                Ok(DecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Stop) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Command channel closed - owner went away
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            // If not playing, yield to avoid busy-waiting
            if !is_playing {
                std::thread::sleep(std::time::Duration::from_millis(10));
                continue;
            }

            // Decode next frame
            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != video_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("Packet send failed: {}", e)));
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_ok() {
                    // Convert to RGBA
                    let mut rgba_frame = ffmpeg_next::frame::Video::empty();
                    if let Err(e) = scaler.run(&decoded_frame, &mut rgba_frame) {
                        let _ = event_tx
                            .blocking_send(DecoderEvent::Error(format!("Scaling failed: {}", e)));
                        continue;
                    }

                    let rgba_data = Self::extract_rgba_data(&rgba_frame);

                    // Calculate PTS in seconds
                    let pts_secs = decoded_frame
                        .timestamp()
                        .map_or(0.0, |pts| pts as f64 * time_base_f64);

                    // Frame pacing: wait until the frame should be displayed
                    if let Some(start_time) = playback_start_time {
                        if first_pts.is_none() {
                            first_pts = Some(pts_secs);
                        }

                        if let Some(first) = first_pts {
                            let frame_delay = pts_secs - first;
                            if frame_delay.is_finite() && frame_delay > 0.0 {
                                let target_time = start_time
                                    + std::time::Duration::from_secs_f64(frame_delay);
                                let now = std::time::Instant::now();
                                if target_time > now {
                                    std::thread::sleep(target_time - now);
                                }
                            }
                        }
                    }

                    let decoded = DecodedFrame {
                        rgba_data: Arc::new(rgba_data),
                        width,
                        height,
                        pts_secs,
                    };

                    if event_tx
                        .blocking_send(DecoderEvent::FrameReady(decoded))
                        .is_err()
                    {
                        // Event channel closed - owner went away
                        return Ok(());
                    }

                    frame_decoded = true;
                    break;
                }
            }

            // If no frame was decoded, we've reached the end of the stream
            if !frame_decoded {
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                break;
            }
        }

        Ok(())
    }

    /// Extracts RGBA data from a decoded frame, handling stride correctly.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decoder_can_be_created_for_local_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let media_path = temp_dir.path().join("test.mp4");
        std::fs::write(&media_path, b"fake video data").unwrap();

        let decoder = AsyncDecoder::new(media_path.to_string_lossy().into_owned());
        assert!(decoder.is_ok());
    }

    #[tokio::test]
    async fn decoder_fails_for_nonexistent_local_file() {
        let result = AsyncDecoder::new("/nonexistent/video.mp4");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn decoder_accepts_network_urls_without_probing() {
        // Opening happens inside the task; creation itself must not block on
        // the network. Port 1 refuses immediately so the task dies fast.
        let decoder = AsyncDecoder::new("http://127.0.0.1:1/lobby.m3u8");
        assert!(decoder.is_ok());
    }

    #[tokio::test]
    async fn decoder_accepts_commands() {
        let temp_dir = tempfile::tempdir().unwrap();
        let media_path = temp_dir.path().join("test.mp4");
        std::fs::write(&media_path, b"fake video data").unwrap();

        let decoder = AsyncDecoder::new(media_path.to_string_lossy().into_owned()).unwrap();

        assert!(decoder.send_command(DecoderCommand::Play).is_ok());
        assert!(decoder.send_command(DecoderCommand::Pause).is_ok());
        assert!(decoder.send_command(DecoderCommand::Stop).is_ok());
    }

    #[test]
    fn decoded_frame_calculates_size() {
        let frame = DecodedFrame {
            rgba_data: Arc::new(vec![0u8; 1280 * 720 * 4]),
            width: 1280,
            height: 720,
            pts_secs: 0.0,
        };

        assert_eq!(frame.size_bytes(), 1280 * 720 * 4);
    }
}
