use std::{net::SocketAddr, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

pub use crate::{config::Config, rest::Config as RestConfig};

pub mod config;
pub mod matcher;
pub mod rest;
pub mod store;

/// The lookup service: owns the configuration, builds the immutable flight
/// store, runs the REST server, and processes control commands.
pub struct Flightman {
    config: Config,
    command_receiver: mpsc::Receiver<Command>,
}

impl Flightman {
    pub fn new(config: Config) -> (Self, mpsc::Sender<Command>) {
        let (command_sender, command_receiver) = mpsc::channel(100);
        (
            Self {
                config,
                command_receiver,
            },
            command_sender,
        )
    }

    pub async fn run(mut self, ready_sender: oneshot::Sender<Result<(), Error>>) {
        info!("Flightman is running...");

        let store = match self.load_store() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!("Failed to load flight store: {e:?}");
                ready_sender
                    .send(Err(e.into()))
                    .expect("Failed to send ready signal");
                return;
            }
        };

        let server = match rest::Server::new(
            &self.config.rest,
            store.clone(),
            self.config.response_delay,
        )
        .await
        {
            Ok(server) => server,
            Err(e) => {
                error!("Failed to start REST server: {e:?}");
                ready_sender
                    .send(Err(e.into()))
                    .expect("Failed to send ready signal");
                return;
            }
        };

        ready_sender
            .send(Ok(()))
            .expect("Failed to send ready signal");

        while let Some(cmd) = self.command_receiver.recv().await {
            debug!("Command received: {cmd:?}");
            match cmd {
                Command::Status { reply_sender } => {
                    let status = Status {
                        flights: store.len(),
                        addr: server.local_addr(),
                    };
                    let _ = reply_sender
                        .send(status)
                        .inspect_err(|_| error!("Failed to send status reply"));
                }
                Command::Shutdown => break,
            }
        }

        // Reached on Shutdown or when every command sender has been dropped.
        server.shutdown().await;
    }

    fn load_store(&self) -> Result<store::FlightStore, store::Error> {
        match &self.config.dataset {
            Some(path) => store::FlightStore::from_path(path),
            None => store::FlightStore::seeded(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] store::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] rest::Error),
}

#[derive(Debug)]
pub enum Command {
    Status {
        reply_sender: oneshot::Sender<Status>,
    },
    Shutdown,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Status {
    pub flights: usize,
    pub addr: SocketAddr,
}
