mod error;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::{sync::oneshot, task::JoinHandle};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

pub use crate::rest::error::Error;
use crate::{Status, matcher, store::FlightStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The fixed body of a 400 response for a missing or empty `flightNumber`.
const FLIGHT_NUMBER_REQUIRED: &str = "Flight number is required";

/// The REST server task and the channel that shuts it down.
pub struct Server {
    addr: SocketAddr,
    server_join_handle: JoinHandle<()>,
    shutdown_sender: oneshot::Sender<()>,
}

#[derive(Clone)]
struct ServerState {
    store: Arc<FlightStore>,
    response_delay: Duration,
    addr: SocketAddr,
}

impl Server {
    pub async fn new(
        config: &Config,
        store: Arc<FlightStore>,
        response_delay: Duration,
    ) -> Result<Self, Error> {
        let listener = tokio::net::TcpListener::bind(config.addr)
            .await
            .map_err(|cause| Error::IO {
                message: "Failed to listen on port".to_string(),
                cause,
            })?;
        let addr = listener.local_addr().map_err(|cause| Error::IO {
            message: "Failed to read bound address".to_string(),
            cause,
        })?;
        let router = router(ServerState {
            store,
            response_delay,
            addr,
        });
        let (shutdown_sender, shutdown_receiver) = oneshot::channel();
        let server_join_handle = tokio::spawn(async move {
            info!("starting REST server: {addr:?}");
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { shutdown_signal(shutdown_receiver).await })
                .await
                .expect("Never fails")
        });

        Ok(Self {
            addr,
            server_join_handle,
            shutdown_sender,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn shutdown(self) {
        // Send shutdown signal to the axum server
        self.shutdown_sender
            .send(())
            .expect("shutdown receiver must exist");
        // Wait until the axum server task is terminated
        self.server_join_handle
            .await
            .expect("REST server task must be terminated without error");
        info!("REST server has been shut down.");
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/flights", get(lookup_flights))
        .route("/status", get(status))
        .layer(
            // Necessary for graceful shutdown
            TimeoutLayer::new(REQUEST_TIMEOUT),
        )
        .with_state(state)
}

/// A future to be passed to the [`axum::Serve::with_graceful_shutdown`].
/// When this future resolves, the axum server will start graceful shutdown.
async fn shutdown_signal(shutdown_receiver: oneshot::Receiver<()>) {
    shutdown_receiver
        .await
        .expect("shutdown sender never be dropped");
    info!("starting graceful shutdown for REST server...");
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupParams {
    flight_number: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// `GET /api/flights?flightNumber=<query>`
///
/// An absent parameter and an explicitly empty one both fail the required
/// check; the empty query never reaches the matcher. The artificial response
/// delay is a tokio timer, so concurrent lookups are not held up by it.
async fn lookup_flights(
    State(state): State<ServerState>,
    Query(params): Query<LookupParams>,
) -> Response {
    let Some(query) = params.flight_number.filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: FLIGHT_NUMBER_REQUIRED,
            }),
        )
            .into_response();
    };

    tokio::time::sleep(state.response_delay).await;

    let matches = matcher::filter(&query, state.store.flights());
    info!("lookup {query:?}: {} matches", matches.len());
    Json(matches).into_response()
}

async fn status(State(state): State<ServerState>) -> Json<Status> {
    Json(Status {
        flights: state.store.len(),
        addr: state.addr,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}
