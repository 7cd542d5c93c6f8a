//! In-memory stores shared by every connection.
//!
//! The [`Dataset`] is loaded once before the server accepts connections and
//! is never mutated afterwards, so workers read it without locking. The
//! [`ResultStore`] is written concurrently and keeps one atomic slot per
//! image.

mod dataset;
mod results;

pub use dataset::{Dataset, DatasetError, Image};
pub use results::ResultStore;
