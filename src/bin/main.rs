use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::Parser;
use flightman::{Command, Config, Error, Flightman, RestConfig};
use tokio::{
    signal,
    sync::{mpsc, oneshot},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    info!("Starting Flightman binary...");
    if let Err(e) = run(args).await {
        error!("Error: {e:?}");
    } else {
        info!("Flightman has been terminated.");
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let config = args.to_config();

    let (flightman, command_sender) = Flightman::new(config);
    let (ready_sender, ready_receiver) = oneshot::channel();
    let flightman_task = tokio::spawn(async move { flightman.run(ready_sender).await });
    ready_receiver
        .await
        .expect("ready channel shouldn't be closed")?;

    handle_status(&command_sender).await;
    daemonize().await;

    // Shutdown Flightman.
    if let Err(e) = command_sender.send(Command::Shutdown).await {
        error!("Channel send error: {e}");
    }
    info!("Waiting for Flightman to terminate...");
    if let Err(e) = flightman_task.await {
        error!("Failed to wait until Flightman is terminated: {e}");
    }
    Ok(())
}

/// A future that resolves when a termination signal is received.
async fn daemonize() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Termination signal received");
}

async fn handle_status(command_sender: &mpsc::Sender<Command>) {
    let (reply_sender, reply_receiver) = oneshot::channel();
    if let Err(e) = command_sender.send(Command::Status { reply_sender }).await {
        error!("Channel send error: {e}");
        return;
    }
    let Ok(status) = reply_receiver.await else {
        error!("Failed to receive status reply");
        return;
    };

    println!("============================");
    println!(" Status");
    println!("============================");
    println!(
        "{}",
        serde_json::to_string_pretty(&status).expect("Status should be serializable")
    );
}

#[derive(Debug, Parser)]
struct Args {
    /// Address the REST server listens on.
    #[clap(long, default_value = "127.0.0.1:3000")]
    rest_addr: SocketAddr,
    /// JSON dataset file; the embedded seed is used when omitted.
    #[clap(long)]
    dataset: Option<PathBuf>,
    /// Artificial latency applied to each successful lookup.
    #[clap(long, value_parser = humantime::parse_duration, default_value = "800ms")]
    response_delay: Duration,
}

impl Args {
    fn to_config(&self) -> Config {
        Config {
            dataset: self.dataset.clone(),
            response_delay: self.response_delay,
            rest: RestConfig {
                addr: self.rest_addr,
            },
        }
    }
}
