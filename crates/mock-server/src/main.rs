use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use mock_server::{MockConfig, MockState, routes};

/// Demo backend for the PsyDesign dashboard
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    listen: SocketAddr,

    /// Delay before generate-brand answers (milliseconds)
    #[arg(long, default_value_t = 3000)]
    generate_latency_ms: u64,

    /// Delay before chat-with-persona answers (milliseconds)
    #[arg(long, default_value_t = 1000)]
    chat_latency_ms: u64,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = MockConfig {
        generate_latency: Duration::from_millis(args.generate_latency_ms),
        chat_latency: Duration::from_millis(args.chat_latency_ms),
        ..MockConfig::default()
    };

    log::info!("mock backend listening on http://{}", args.listen);
    let server = warp::serve(routes(MockState::new(config))).run(args.listen);

    tokio::select! {
        _ = server => {}
        _ = tokio::signal::ctrl_c() => log::info!("shutting down"),
    }
}
