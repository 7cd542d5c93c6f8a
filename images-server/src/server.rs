//! Listener and application assembly.
//!
//! Every accepted connection is served on its own tokio task, so requests
//! run in parallel on the runtime's worker threads and a failing connection
//! only takes its own task down.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::logging;
use crate::state::AppState;

/// The full application: API routes plus logging and connection handling.
pub fn app(state: Arc<AppState>) -> Router {
    api::router(&state)
        .layer(middleware::map_response(logging::close_connection))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(TraceLayer::new_for_http().make_span_with(logging::request_span))
        .with_state(state)
}

pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    pub async fn bind(addr: &str, state: Arc<AppState>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            app: app(state),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` completes.
    ///
    /// Connections already accepted are not waited for: they keep running
    /// until they finish or the runtime shuts down.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let serve = axum::serve(
            self.listener,
            self.app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .into_future();

        tokio::select! {
            result = serve => result,
            () = shutdown => {
                tracing::info!("Shutdown requested, no longer accepting connections");
                Ok(())
            }
        }
    }

    /// Accept connections until the process exits.
    pub async fn run(self) -> std::io::Result<()> {
        self.run_until(std::future::pending()).await
    }
}
