use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;

use super::messages::{BodyTable, ClientMessage, InitialState, PositionUpdate, ServerMessage};
use super::state::AppState;
use super::ticker;

pub(super) async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle(socket, state))
}

async fn handle(socket: WebSocket, state: AppState) {
    tracing::info!("client connected");

    let mut updates = state.subscribe();
    ticker::ensure_started(&state);

    let (mut sender, mut receiver) = socket.split();

    let initial = ServerMessage::InitialState(InitialState {
        bodies: BodyTable::new(state.registry()),
        state: state.clock().snapshot().rounded(),
    });
    if send(&mut sender, &initial).await.is_err() {
        tracing::info!("client disconnected before initial state");
        return;
    }

    loop {
        tokio::select! {
            update = updates.recv() => {
                let update = match update {
                    Ok(u) => u,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!("client lagged by {n} updates");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if send(&mut sender, &ServerMessage::PositionUpdate(update)).await.is_err() {
                    tracing::info!("client disconnected (send failed)");
                    break;
                }
            }

            msg = receiver.next() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!("client disconnected (error): {e}");
                        break;
                    }
                    _ => continue,
                };

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::RequestUpdate) => {
                        let update: PositionUpdate = state.clock().snapshot().into();
                        if send(&mut sender, &ServerMessage::PositionUpdate(update)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::debug!("ignoring client message {text:?}: {e}"),
                }
            }
        }
    }
}

/// Serializes and sends one message. Fails without sending if serialization fails.
async fn send<S>(sender: &mut S, msg: &impl Serialize) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(msg).map_err(|e| {
        tracing::error!("could not serialize message: {e}");
        axum::Error::new(e)
    })?;
    sender.send(Message::Text(json)).await
}
