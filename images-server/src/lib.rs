//! Images Server - streams dataset images over HTTP and collects the labels
//! clients predict for them.

pub mod api;
pub mod chunked;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod server;
pub mod state;
pub mod store;

pub use chunked::ChunkedStreamer;
pub use codec::{ImageCodec, RasterCodec};
pub use crate::config::{Cli, Config};
pub use ::config::ConfigError;
pub use error::{Error, Result};
pub use export::{CsvExporter, ExportError, ExportReport, ResultExporter};
pub use server::Server;
pub use state::AppState;
pub use store::{Dataset, DatasetError, ResultStore};
