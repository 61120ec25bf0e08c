//! WebSocket client for the telemetry stream: connect, pump frames into the
//! app's event queue, and (optionally) reconnect.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async, connect_async_tls_with_config, tungstenite::Message, Connector,
    MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConnectError;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// What the stream task reports to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// One inbound frame's payload, in arrival order.
    Message(String),
    /// The connection ended and the policy declined to reconnect.
    Closed,
}

/// Decides whether and when to redial after the stream drops.
///
/// `attempt` counts consecutive failures since the last successful
/// connection, starting at 0.
pub trait ReconnectPolicy: Send + 'static {
    fn next_delay(&mut self, attempt: u32) -> Option<Duration>;
}

/// Stay on the last snapshot once the stream ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReconnect;

impl ReconnectPolicy for NoReconnect {
    fn next_delay(&mut self, _attempt: u32) -> Option<Duration> {
        None
    }
}

/// Exponential backoff capped at `max`, retrying forever.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(30),
        }
    }
}

impl ReconnectPolicy for Backoff {
    fn next_delay(&mut self, attempt: u32) -> Option<Duration> {
        let factor = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
        Some(self.initial.saturating_mul(factor).min(self.max))
    }
}

impl ReconnectPolicy for Box<dyn ReconnectPolicy> {
    fn next_delay(&mut self, attempt: u32) -> Option<Duration> {
        (**self).next_delay(attempt)
    }
}

/// Where to (re)connect to.
#[derive(Debug, Clone)]
pub struct StreamTarget {
    pub url: Url,
    pub tls_ca: Option<String>,
}

/// Connect to the producer. `tls_ca` pins a PEM CA bundle for `wss://`
/// endpoints with self-signed certificates.
pub async fn connect(url: &Url, tls_ca: Option<&str>) -> Result<WsStream, ConnectError> {
    let handshake = |source: tokio_tungstenite::tungstenite::Error| ConnectError::Handshake {
        url: url.to_string(),
        source,
    };
    match tls_ca {
        Some(path) if url.scheme() == "wss" => {
            let config = client_config_with_ca(Path::new(path))?;
            let (ws, _) = connect_async_tls_with_config(
                url.as_str(),
                None,
                false,
                Some(Connector::Rustls(Arc::new(config))),
            )
            .await
            .map_err(handshake)?;
            Ok(ws)
        }
        _ => {
            let (ws, _) = connect_async(url.as_str()).await.map_err(handshake)?;
            Ok(ws)
        }
    }
}

fn client_config_with_ca(path: &Path) -> Result<rustls::ClientConfig, ConnectError> {
    let file = File::open(path).map_err(|source| ConnectError::CaRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut roots = rustls::RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut reader) {
        let cert = cert.map_err(|source| ConnectError::CaRead {
            path: path.to_path_buf(),
            source,
        })?;
        roots.add(cert).map_err(|source| ConnectError::CaInvalid {
            path: path.to_path_buf(),
            source,
        })?;
    }
    if roots.is_empty() {
        return Err(ConnectError::CaEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth())
}

/// Owns the background stream task.
pub struct StreamHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl StreamHandle {
    /// Send a Close frame and wait for the task to finish.
    pub async fn close(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            debug!("stream task ended abnormally: {e}");
        }
    }
}

enum PumpEnd {
    Shutdown,
    Dropped,
}

/// Spawn the task that forwards frames from `ws` into `tx`. With no initial
/// stream the task starts by dialing through `policy`.
pub fn spawn_stream<P: ReconnectPolicy>(
    ws: Option<WsStream>,
    target: StreamTarget,
    mut policy: P,
    tx: mpsc::UnboundedSender<StreamEvent>,
) -> StreamHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ws = ws;
        let mut attempt: u32 = 0;
        loop {
            if let Some(stream) = ws.take() {
                match pump(stream, &tx, &mut shutdown_rx).await {
                    PumpEnd::Shutdown => return,
                    PumpEnd::Dropped => info!("telemetry stream dropped: {}", target.url),
                }
            }
            let Some(delay) = policy.next_delay(attempt) else {
                let _ = tx.send(StreamEvent::Closed);
                return;
            };
            attempt = attempt.saturating_add(1);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown_rx.changed() => return,
            }
            let redial = tokio::select! {
                r = connect(&target.url, target.tls_ca.as_deref()) => r,
                _ = shutdown_rx.changed() => return,
            };
            match redial {
                Ok(stream) => {
                    info!("reconnected to {}", target.url);
                    attempt = 0;
                    ws = Some(stream);
                }
                Err(e) => warn!("reconnect attempt {attempt} failed: {e}"),
            }
        }
    });
    StreamHandle { shutdown, task }
}

async fn pump(
    mut ws: WsStream,
    tx: &mpsc::UnboundedSender<StreamEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> PumpEnd {
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                let _ = ws.close(None).await;
                return PumpEnd::Shutdown;
            }
            frame = ws.next() => {
                let payload = match frame {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                        Ok(text) => text,
                        Err(_) => {
                            debug!("ignoring non-UTF-8 binary frame");
                            continue;
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => return PumpEnd::Dropped,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        debug!("websocket read error: {e}");
                        return PumpEnd::Dropped;
                    }
                };
                if tx.send(StreamEvent::Message(payload)).is_err() {
                    // receiver gone: the view was torn down
                    let _ = ws.close(None).await;
                    return PumpEnd::Shutdown;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reconnect_never_retries() {
        let mut p = NoReconnect;
        assert_eq!(p.next_delay(0), None);
        assert_eq!(p.next_delay(5), None);
    }

    #[test]
    fn backoff_doubles_then_caps() {
        let mut p = Backoff {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(1),
        };
        assert_eq!(p.next_delay(0), Some(Duration::from_millis(100)));
        assert_eq!(p.next_delay(1), Some(Duration::from_millis(200)));
        assert_eq!(p.next_delay(3), Some(Duration::from_millis(800)));
        assert_eq!(p.next_delay(4), Some(Duration::from_secs(1)));
        assert_eq!(p.next_delay(u32::MAX), Some(Duration::from_secs(1)));
    }

    #[test]
    fn missing_ca_bundle_is_reported() {
        let err = client_config_with_ca(Path::new("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(err, ConnectError::CaRead { .. }));
    }

    #[test]
    fn empty_ca_bundle_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = client_config_with_ca(file.path()).unwrap_err();
        assert!(matches!(err, ConnectError::CaEmpty { .. }));
    }
}
