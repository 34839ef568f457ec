//! Streaming transport over a single WebSocket connection.
//!
//! The connection opens eagerly in [`WsTransport::connect`] and lives until
//! the transport is closed or dropped, or the server goes away. Every text
//! frame the server pushes is forwarded to the reply channel; the channel
//! closes with the connection. There is no reconnect.

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use wrelay_core::transport::{ChatTransport, ReplyReceiver, reply_channel};
use wrelay_types::error::TransportError;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// WebSocket client for the relay's `/ws` endpoint.
pub struct WsTransport {
    sink: Mutex<WsSink>,
    reader: JoinHandle<()>,
}

impl WsTransport {
    /// Open the connection and start forwarding server frames.
    pub async fn connect(url: &str) -> Result<(Self, ReplyReceiver), TransportError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        tracing::info!(%url, "WebSocket connected");

        let (sink, mut source) = stream.split();
        let (tx, rx) = reply_channel();

        let reader = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if tx.send(text.as_str().to_string()).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    // Binary, ping, pong
                    Ok(_) => {}
                    Err(err) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                }
            }
            tracing::info!("WebSocket connection closed");
        });

        let transport = Self {
            sink: Mutex::new(sink),
            reader,
        };
        Ok((transport, rx))
    }

    /// Send a close frame. Further sends fail with [`TransportError::Closed`].
    pub async fn close(&self) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .close()
            .await
            .map_err(|_| TransportError::Closed)
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

impl ChatTransport for WsTransport {
    fn name(&self) -> &str {
        "ws"
    }

    async fn send(&self, text: &str) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .send(Message::text(text.to_string()))
            .await
            .map_err(|_| TransportError::Closed)
    }
}
