//! Notification WebSocket endpoint — 实时 HR 事件推送
//!
//! GET /api/notifications/ws
//!
//! 协议: 服务器单向推送，每个 [`HubEvent`] 一条 JSON 文本帧
//! `{"event": "...", "data": {...}}`。客户端帧除 Close 外全部忽略。
//! 落后的订阅者丢弃错过的事件继续接收 — 通知流是提醒流，不保证
//! 完整历史。

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::core::ServerState;

/// Server ping cadence to keep intermediaries from idling the socket out
const PING_INTERVAL_SECS: u64 = 30;

/// GET /api/notifications/ws
pub async fn ws(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| notification_session(socket, state))
}

async fn notification_session(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();

    let mut rx = state.hub.subscribe();
    let conn_id = state.hub.register("console");
    tracing::info!(conn_id, "Notification client connected");

    let mut ping_interval = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = rx.recv() => {
                match event {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(json) => {
                            if sink.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize hub event");
                        }
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            conn_id,
                            lagged = n,
                            "Notification subscriber lagged, missed events dropped"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // pongs and client chatter are ignored
                    Some(Err(_)) => break,
                }
            }
        }
    }

    state.hub.unregister(conn_id);
    tracing::info!(conn_id, "Notification client disconnected");
}
