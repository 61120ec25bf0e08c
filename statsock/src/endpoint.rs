//! Derive the telemetry stream URL from a dashboard address.

use url::Url;

use crate::error::EndpointError;

/// Path the producer serves the snapshot stream on.
pub const STATS_PATH: &str = "/ws/stats";

/// Used when neither an address nor a profile is given.
pub const DEFAULT_BASE: &str = "http://localhost:8000";

/// Map a dashboard address to its stream URL.
///
/// `https` maps to `wss` and `http` to `ws`; host and port carry over and the
/// path becomes [`STATS_PATH`]. A `ws`/`wss` URL with a non-root path is taken
/// as an explicit stream endpoint and returned unchanged.
pub fn stream_url(base: &str) -> Result<Url, EndpointError> {
    let input = base.trim();
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{input}")
    };
    let mut url = Url::parse(&with_scheme).map_err(|source| EndpointError::Invalid {
        input: input.to_string(),
        source,
    })?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(EndpointError::MissingHost {
            input: input.to_string(),
        });
    }

    let explicit = match url.scheme() {
        "ws" | "wss" => url.path() != "/" && !url.path().is_empty(),
        "http" | "https" => false,
        other => {
            return Err(EndpointError::UnsupportedScheme {
                scheme: other.to_string(),
            })
        }
    };
    if explicit {
        return Ok(url);
    }

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    // http <-> ws swaps are always permitted by the url crate (both special schemes)
    if url.set_scheme(scheme).is_err() {
        return Err(EndpointError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }
    url.set_path(STATS_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
