//! WebSocket 端点
//!
//! 每个连接注册为通知中心的一个观察者，把所有广播事件按
//! `{type, data}` 的 JSON 格式转发给客户端；客户端发来的文本
//! 消息原样回显。连接断开时把观察者从通知中心移除。

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::state::AppState;

/// WebSocket 写操作命令
///
/// 使用命令模式统一管理所有对 sender 的写操作
#[derive(Debug)]
enum WsCommand {
    SendText(String),
    SendPong(Vec<u8>),
}

pub(crate) async fn websocket_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let handle = state.hub.subscribe().await;
    let observer_id = handle.id;
    let mut events = handle.receiver;

    tracing::info!(observer_id = %observer_id, "WebSocket 连接已建立");

    let (mut sender, mut incoming) = socket.split();

    // mpsc channel 解耦对 sender 的访问
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<WsCommand>(32);

    // 发送任务：处理写命令并转发通知中心的广播事件
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(cmd) = cmd_rx.recv() => {
                    match cmd {
                        WsCommand::SendText(text) => {
                            if sender.send(WsMessage::Text(text.into())).await.is_err() {
                                tracing::warn!("Failed to send text message");
                                break;
                            }
                        }
                        WsCommand::SendPong(data) => {
                            if sender.send(WsMessage::Pong(data.into())).await.is_err() {
                                tracing::warn!("Failed to send pong message");
                                break;
                            }
                        }
                    }
                }
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let payload = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to serialize notification event");
                            continue;
                        }
                    };
                    if sender.send(WsMessage::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // 接收任务：处理来自客户端的消息
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = incoming.next().await {
            if handle_incoming(message, &cmd_tx).await.is_err() {
                break;
            }
        }
    });

    // 任意一侧结束即认为连接关闭
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.hub.unsubscribe(observer_id).await;
    tracing::info!(observer_id = %observer_id, "WebSocket 连接已断开，观察者已移除");
}

/// 处理来自客户端的单条消息
async fn handle_incoming(
    message: WsMessage,
    cmd_tx: &mpsc::Sender<WsCommand>,
) -> Result<(), ()> {
    match message {
        WsMessage::Close(_) => {
            tracing::debug!("WebSocket closed by client");
            return Err(());
        }
        WsMessage::Ping(data) => {
            if cmd_tx
                .send(WsCommand::SendPong(data.to_vec()))
                .await
                .is_err()
            {
                return Err(());
            }
        }
        WsMessage::Pong(_) => {}
        WsMessage::Text(text) => {
            // 回显，客户端指令留作扩展点
            if cmd_tx
                .send(WsCommand::SendText(format!("Echo: {}", text.as_str())))
                .await
                .is_err()
            {
                return Err(());
            }
        }
        WsMessage::Binary(_) => {
            tracing::debug!("binary frames are not supported");
        }
    }
    Ok(())
}
