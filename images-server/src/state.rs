//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::chunked::ChunkedStreamer;
use crate::codec::ImageCodec;
use crate::config::Config;
use crate::export::ResultExporter;
use crate::store::{Dataset, ResultStore};

/// Shared application state passed to all handlers.
///
/// The dataset is read-only once built; the result store takes concurrent
/// writes through its per-image atomic slots.
pub struct AppState {
    pub config: Config,
    pub dataset: Dataset,
    pub results: ResultStore,
    pub streamer: ChunkedStreamer,
    pub codec: Arc<dyn ImageCodec>,
    pub exporter: Arc<dyn ResultExporter>,
}

impl AppState {
    pub fn new(
        config: Config,
        dataset: Dataset,
        codec: Arc<dyn ImageCodec>,
        exporter: Arc<dyn ResultExporter>,
    ) -> Self {
        let streamer = ChunkedStreamer::new(config.server.chunk_size);
        Self {
            config,
            dataset,
            results: ResultStore::new(),
            streamer,
            codec,
            exporter,
        }
    }

    /// How long a request may take to arrive in full.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.config.server.read_timeout_secs)
    }
}
