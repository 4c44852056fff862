//! # Drawbot Storage
//!
//! Persistence for drawings. The [`DrawingGateway`] turns a session's
//! command list into a stored drawing and back, preserving command order.
//! Backends implement [`DrawingBackend`]; two are provided:
//!
//! - [`HttpBackend`]: REST client for a drawing storage service
//! - [`MemoryBackend`]: in-process store, optionally answering with
//!   reference-preserving envelopes
//!
//! Backends may wrap sequences in envelopes; [`envelope::unwrap_sequence`]
//! strips them at the gateway so no other code sees them.

mod backend;
mod drawing;
pub mod envelope;
mod error;
mod gateway;
mod http;
mod memory;

pub use backend::DrawingBackend;
pub use drawing::{Drawing, SEQUENCE_KEY};
pub use envelope::unwrap_sequence;
pub use error::StorageError;
pub use gateway::DrawingGateway;
pub use http::HttpBackend;
pub use memory::MemoryBackend;
