//! Feed assembly and thread navigation for a Nostr client.
//!
//! Relay subscriptions are merged and deduplicated ([`stream`]), bounded by
//! an idle timeout, filtered into feeds ([`feed`]), enriched with names and
//! the viewer's reactions ([`enrich`]), and navigated as reply threads
//! ([`thread`]). [`app`] is the single-threaded state machine that drives it
//! all; [`runtime`] executes the commands it emits.

pub mod app;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod error;
pub mod feed;
pub mod image;
pub mod keys;
pub mod models;
pub mod nostr;
pub mod publish;
pub mod runtime;
pub mod stream;
pub mod thread;
pub mod tracing_setup;
pub mod transport;

pub use error::{CoreError, CoreResult};
