//! WebSocket connection loop.
//!
//! Forwards the connected user's events from the event bus and watches the
//! socket for close frames. Client text frames are ignored.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::WsMessage;
use crate::domain::{RecordedEvent, UserId};

/// Runs the read/write loop for a single live-stream connection.
pub async fn run_connection(
    socket: WebSocket,
    user_id: UserId,
    mut event_rx: broadcast::Receiver<RecordedEvent>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::debug!(%user_id, "live stream opened");

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                let outgoing = match event {
                    Ok(recorded) if recorded.user_id == user_id => WsMessage::event(&recorded.event),
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%user_id, lagged = n, "live stream lagged behind event bus");
                        WsMessage::lagged(n)
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if ws_tx.send(Message::text(outgoing.to_json())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!(%user_id, "live stream closed");
}
