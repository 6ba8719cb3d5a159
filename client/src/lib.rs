//! # Palsync Client
//! Holds an in-memory replica of a game-save document (players, pals,
//! guilds, bases, item containers), tracks per-entity dirtiness through
//! lifecycle tags, and reconciles minimal change-sets with an authoritative
//! backend over a persistent message channel.
//!
//! The core is sans-IO and single-threaded: [`Client::receive`] is the one
//! pump that drains the transport, resolves correlated replies, dispatches
//! pushes, advances timers, and returns the events produced.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod client;
mod connection;
mod diff;
mod dispatch;
mod events;
mod loader;
mod request;
mod store;

pub mod transport;

pub use client::{Client, SaveOutcome};
pub use connection::{config::SessionConfig, session::Session};
pub use diff::extract_change_set;
pub use events::ClientEvent;
pub use loader::FetchOutcome;
pub use request::{RequestError, RequestManager, ResponseKey};
pub use store::{EntityStore, OwnerRef};
