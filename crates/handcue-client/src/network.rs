//! Server connection.
//!
//! Once connected, two duties share the socket: the listener applies server
//! directives to the session, the sender drains the intent queue onto the
//! wire. Whichever finishes first ends the session and the other is dropped.

use crate::queue::{IntentReceiver, Outbound};
use crate::session::SharedSession;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use handcue_core::{RoundDetails, ServerMessage};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a session that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The server closed the connection.
    ServerClosed,
    /// The shutdown sentinel came through the queue.
    Shutdown,
}

/// Why a session failed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },
    #[error("timed out connecting to {url} after {timeout:?}")]
    ConnectTimeout { url: String, timeout: Duration },
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
    #[error("could not encode intent: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One connection to the game server.
pub struct NetworkSession {
    url: String,
    connect_timeout: Option<Duration>,
    session: SharedSession,
}

impl NetworkSession {
    /// Session against `url` that applies directives to `session`.
    pub fn new(url: impl Into<String>, session: SharedSession) -> Self {
        Self {
            url: url.into(),
            connect_timeout: None,
            session,
        }
    }

    /// Give up connecting after `timeout`. No limit by default.
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connect and run until either duty ends.
    ///
    /// The queue is borrowed, not consumed: intents pushed after the session
    /// is over stay queued rather than failing the producer.
    pub async fn run(&self, queue: &mut IntentReceiver) -> Result<SessionOutcome, SessionError> {
        let ws = self.connect().await?;
        tracing::info!(url = %self.url, "connected");
        let (mut sink, stream) = ws.split();

        let outcome = tokio::select! {
            result = listen(stream, &self.session) => result,
            result = send_queued(&mut sink, queue) => result,
        };

        if let Ok(SessionOutcome::Shutdown) = outcome
            && let Err(error) = sink.close().await
        {
            tracing::debug!(%error, "close handshake failed");
        }
        outcome
    }

    async fn connect(&self) -> Result<WsStream, SessionError> {
        tracing::debug!(url = %self.url, "connecting");
        let connecting = tokio_tungstenite::connect_async(self.url.as_str());
        let result = match self.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connecting)
                .await
                .map_err(|_| SessionError::ConnectTimeout {
                    url: self.url.clone(),
                    timeout,
                })?,
            None => connecting.await,
        };
        let (ws, _response) = result.map_err(|source| SessionError::Connect {
            url: self.url.clone(),
            source,
        })?;
        Ok(ws)
    }
}

/// Listener duty. Ends when the server closes the connection.
async fn listen<S>(mut stream: S, session: &SharedSession) -> Result<SessionOutcome, SessionError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    tracing::debug!("listener started");
    while let Some(msg) = stream.next().await {
        match msg? {
            Message::Text(text) => handle_inbound(text.as_str(), session),
            Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                Ok(text) => handle_inbound(text, session),
                Err(_) => tracing::warn!(len = bytes.len(), "ignoring non-UTF-8 binary message"),
            },
            Message::Close(frame) => {
                tracing::info!(?frame, "server closed the connection");
                break;
            }
            _ => {}
        }
    }
    Ok(SessionOutcome::ServerClosed)
}

/// Sender duty. Ends on the shutdown sentinel.
async fn send_queued<S>(
    sink: &mut S,
    queue: &mut IntentReceiver,
) -> Result<SessionOutcome, SessionError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    tracing::debug!("sender started");
    loop {
        match queue.next().await {
            Outbound::Shutdown => {
                tracing::info!("shutdown received, ending session");
                return Ok(SessionOutcome::Shutdown);
            }
            Outbound::Intent(intent) => {
                let json = intent.to_json()?;
                tracing::info!(message = %json, "sending");
                sink.send(Message::Text(json.into())).await?;
            }
        }
    }
}

fn handle_inbound(text: &str, session: &SharedSession) {
    tracing::debug!(raw = text, "received");
    let message = match ServerMessage::decode(text) {
        Ok(message) => message,
        Err(error) => {
            tracing::warn!(%error, "ignoring malformed server message");
            return;
        }
    };
    log_round(&message.details);

    let Some(directive) = message.directive else {
        tracing::debug!("no directive in server message");
        return;
    };
    match session.apply(directive) {
        Some(state) => tracing::info!(%state, sub_action = directive.as_sub_action(), "server changed mode"),
        None => tracing::debug!(sub_action = directive.as_sub_action(), "already in requested mode"),
    }
}

fn log_round(details: &RoundDetails) {
    if let Some(question) = &details.question {
        tracing::info!(
            dice = ?details.dice_value,
            options = ?details.options,
            "question: {}",
            question
        );
    }
    if let Some(correct) = details.correct {
        tracing::info!(
            correct,
            answer = ?details.correct_answer,
            dice = ?details.dice_value,
            "answer result"
        );
    }
}
