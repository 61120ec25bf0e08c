//! Error types surfaced by the library half of statsock.

use std::path::PathBuf;
use thiserror::Error;

/// The configured dashboard address could not be turned into a stream URL.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid address {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme {scheme:?} (expected http, https, ws or wss)")]
    UnsupportedScheme { scheme: String },

    #[error("address {input:?} has no host")]
    MissingHost { input: String },
}

/// Opening the telemetry stream failed.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to read CA bundle {path:?}: {source}")]
    CaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CA bundle {path:?} contains no usable certificates")]
    CaEmpty { path: PathBuf },

    #[error("rejected certificate in {path:?}: {source}")]
    CaInvalid {
        path: PathBuf,
        #[source]
        source: rustls::Error,
    },

    #[error("websocket handshake with {url} failed: {source}")]
    Handshake {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
}

/// An inbound message was not a well-formed snapshot.
#[derive(Debug, Error)]
#[error("malformed snapshot: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);
