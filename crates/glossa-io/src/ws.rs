use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use glossa_protocol::{Request, Response};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

/// Produces the response to one decoded request.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, request: Request) -> Response;
}

/// Decode one JSON request frame and encode the reply.
pub async fn handle_message(responder: &dyn Responder, text: &str) -> Result<String, serde_json::Error> {
    let response = match serde_json::from_str::<Request>(text) {
        Ok(request) => responder.respond(request).await,
        Err(e) => {
            tracing::warn!("Undecodable request: {e}");
            Response::error("Invalid request")
        }
    };
    serde_json::to_string(&response)
}

/// Accept WebSocket connections until cancelled
pub async fn serve(
    listener: TcpListener,
    responder: Arc<dyn Responder>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("Listening on ws://{}", listener.local_addr()?);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("WebSocket server stopping");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                let id = Uuid::new_v4();
                let responder = Arc::clone(&responder);
                let cancel = cancel.child_token();

                tokio::spawn(
                    async move {
                        tracing::debug!(%peer, "Connection opened");
                        match handle_connection(stream, responder, cancel).await {
                            Ok(handled) => tracing::debug!(handled, "Connection closed"),
                            Err(e) => tracing::warn!("Connection failed: {e}"),
                        }
                    }
                    .instrument(tracing::info_span!("ws", %id)),
                );
            }
        }
    }
}

/// Answer text frames in arrival order, returning how many were answered
async fn handle_connection(
    stream: TcpStream,
    responder: Arc<dyn Responder>,
    cancel: CancellationToken,
) -> anyhow::Result<usize> {
    let ws_stream = accept_async(stream).await?;
    let (mut write, mut read) = ws_stream.split();
    let mut handled = 0;

    loop {
        let msg = tokio::select! {
            _ = cancel.cancelled() => break,
            msg = read.next() => msg,
        };
        let Some(msg) = msg else {
            break;
        };

        match msg? {
            Message::Text(text) => {
                let reply = handle_message(responder.as_ref(), text.as_str()).await?;
                write.send(Message::text(reply)).await?;
                handled += 1;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    Ok(handled)
}
