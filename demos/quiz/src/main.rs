//! Dice-and-quiz server for handcue controllers.
//!
//! A closed fist rolls the die and opens a multiple-choice question; hovering
//! over an option answers it. Every connected controller sees the same game.
//!
//! Run:
//!   cargo run -p handcue-demo-quiz -- --port 3000
//!   detector | cargo run -p handcue-client -- --server-url ws://localhost:3000/ws

mod protocol;
mod quiz;
mod server;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("handcue_demo_quiz=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let port = parse_arg(&args, "--port").unwrap_or(3000);

    tracing::info!("Starting quiz server on port {}", port);

    server::run(port).await
}

fn parse_arg(args: &[String], flag: &str) -> Option<u16> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
