//! Quiz server implementation.

use crate::protocol::Broadcast;
use crate::quiz::Quiz;
use futures_util::{SinkExt, StreamExt};
use handcue_core::Intent;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{RwLock, broadcast};
use tokio_tungstenite::tungstenite::Message;

type SharedQuiz = Arc<RwLock<Quiz>>;

pub async fn run(port: u16) -> anyhow::Result<()> {
    let quiz = Arc::new(RwLock::new(Quiz::default()));
    let (broadcast_tx, _) = broadcast::channel::<String>(16);

    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on ws://{}/ws", addr);

    loop {
        let (stream, client_addr) = listener.accept().await?;
        let quiz = quiz.clone();
        let broadcast_tx = broadcast_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, client_addr, quiz, broadcast_tx).await {
                tracing::warn!("Connection error from {}: {}", client_addr, e);
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    quiz: SharedQuiz,
    broadcast_tx: broadcast::Sender<String>,
) -> anyhow::Result<()> {
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut stream) = ws.split();
    let mut broadcast_rx = broadcast_tx.subscribe();

    tracing::info!("Controller connected from {}", addr);

    loop {
        tokio::select! {
            msg = stream.next() => {
                let msg = match msg {
                    Some(Ok(msg)) => msg,
                    _ => break,
                };

                if let Message::Text(text) = msg {
                    let intent: Intent = match serde_json::from_str(&text) {
                        Ok(intent) => intent,
                        Err(e) => {
                            tracing::warn!("Ignoring message from {}: {}", addr, e);
                            continue;
                        }
                    };
                    tracing::info!("{} sent {:?}", addr, intent);

                    let reply = handle_intent(&quiz, intent).await;
                    let json = reply.to_json()?;
                    if matches!(reply, Broadcast::Error { .. }) {
                        sink.send(Message::Text(json.into())).await?;
                    } else {
                        // Every controller follows the same game.
                        let _ = broadcast_tx.send(json);
                    }
                }
            }

            update = broadcast_rx.recv() => {
                match update {
                    Ok(json) => sink.send(Message::Text(json.into())).await?,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("{} missed {} updates", addr, n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::info!("{} disconnected", addr);
    Ok(())
}

async fn handle_intent(quiz: &SharedQuiz, intent: Intent) -> Broadcast {
    let mut q = quiz.write().await;
    match intent {
        Intent::TriggerRequest => q.roll(&mut rand::thread_rng()),
        Intent::ChoiceSubmission { choice } => {
            let result = q.answer(&choice);
            tracing::info!("Answer {} judged, {} rounds played", choice, q.rounds_played);
            result
        }
    }
}
