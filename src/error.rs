// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Stream(StreamError),
}

/// Specific error types for stream playback issues.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone)]
pub enum StreamError {
    /// Stream URL could not be reached (network failure, DNS, 404)
    Unreachable(String),

    /// Input could not be opened or its manifest/container rejected
    OpenFailed(String),

    /// Input opened but contains no video stream
    NoVideoStream,

    /// Decoding failed during playback
    DecodingFailed(String),

    /// Generic error with raw message
    Other(String),
}

impl StreamError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StreamError::Unreachable(_) => "error-stream-unreachable",
            StreamError::OpenFailed(_) => "error-stream-open-failed",
            StreamError::NoVideoStream => "error-stream-no-video",
            StreamError::DecodingFailed(_) => "error-stream-decoding-failed",
            StreamError::Other(_) => "error-stream-general",
        }
    }

    /// Attempts to parse a raw error message into a specific `StreamError`.
    /// This is used to categorize errors reported by the FFmpeg decoder.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Network-level failures (unreachable host, HTTP errors, timeouts)
        if msg_lower.contains("connection refused")
            || msg_lower.contains("connection timed out")
            || msg_lower.contains("name or service not known")
            || msg_lower.contains("server returned 4")
            || msg_lower.contains("server returned 5")
            || msg_lower.contains("network is unreachable")
        {
            return StreamError::Unreachable(msg.to_string());
        }

        // Open/parse failures (bad manifest, unknown container, missing file)
        if msg_lower.contains("invalid data found")
            || msg_lower.contains("no such file")
            || msg_lower.contains("failed to open")
            || msg_lower.contains("manifest")
        {
            return StreamError::OpenFailed(msg.to_string());
        }

        // No video stream
        if msg_lower.contains("no video stream") || msg_lower.contains("no video track") {
            return StreamError::NoVideoStream;
        }

        // Decoding failures
        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("decode")
            || msg_lower.contains("codec")
        {
            return StreamError::DecodingFailed(msg.to_string());
        }

        StreamError::Other(msg.to_string())
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Unreachable(msg) => write!(f, "Stream unreachable: {}", msg),
            StreamError::OpenFailed(msg) => write!(f, "Failed to open stream: {}", msg),
            StreamError::NoVideoStream => write!(f, "No video stream found"),
            StreamError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            StreamError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Stream(e) => write!(f, "Stream Error: {}", e),
        }
    }
}

impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        Error::Stream(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
