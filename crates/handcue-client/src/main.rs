//! handcue controller.
//!
//! Reads hand-pose frames as JSON lines on stdin (one per camera frame, from
//! an external landmark detector) and plays the game over WebSocket.
//!
//! Run against the quiz demo:
//!   cargo run -p handcue-demo-quiz
//!   detector | cargo run -p handcue-client -- --server-url ws://localhost:3000/ws

use clap::Parser;
use handcue_client::{
    Cli, Config, GestureInterpreter, GestureLoop, NdjsonFrames, NetworkSession, SharedSession,
    StopHandle, TraceOverlay, intent_queue,
};
use std::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("handcue=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;
    let zones = config.build_zones()?;

    let session = SharedSession::default();
    let (queue, mut intents) = intent_queue();
    let stop = StopHandle::new(queue.clone());

    tracing::info!(
        url = %config.server_url,
        zones = ?config.zones.names,
        "starting controller"
    );

    let interpreter = GestureInterpreter::new(zones, config.hover_time(), config.fist_cooldown());
    let gestures = {
        let session = session.clone();
        let stop = stop.clone();
        let (width, height) = (config.frame_width, config.frame_height);
        let frame_interval = config.frame_interval();
        let max_frame_errors = config.max_frame_errors;
        std::thread::Builder::new()
            .name("gestures".into())
            .spawn(move || {
                let frames = NdjsonFrames::new(BufReader::new(std::io::stdin()), width, height);
                GestureLoop::new(interpreter, session, queue, stop, frames, TraceOverlay::default())
                    .frame_interval(frame_interval)
                    .max_frame_errors(max_frame_errors)
                    .run();
            })?
    };

    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.stop();
            }
        });
    }

    let network = NetworkSession::new(config.server_url.as_str(), session)
        .connect_timeout(config.connect_timeout());
    match network.run(&mut intents).await {
        Ok(outcome) => tracing::info!(?outcome, "session ended"),
        Err(error) => tracing::error!(%error, "network session failed"),
    }

    if !stop.is_stopped() {
        tracing::warn!("continuing without a server; intents will not be delivered");
        stop.stopped().await;
        tracing::info!(undelivered = intents.len(), "stopping");
    }

    // A thread still blocked on stdin is abandoned, not joined.
    if gestures.is_finished() && gestures.join().is_err() {
        tracing::error!("gesture thread panicked");
    }
    Ok(())
}
