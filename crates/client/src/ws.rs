//! Websocket implementation of the runtime transport.
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::error::Error as WsError;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use runtime::{Transport, TransportError};

pub struct WsTransport {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (socket, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(TransportError::connect)?;
        tracing::info!(url, "websocket connected");
        Ok(Self { socket })
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.socket
            .send(Message::Text(frame))
            .await
            .map_err(TransportError::send)
    }

    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        // Skip over control and binary frames; the protocol is text-only.
        loop {
            match self.socket.next().await {
                None => return Ok(None),
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) => return Ok(None),
                Some(Err(err)) => return Err(TransportError::recv(err)),
            }
        }
    }
}
