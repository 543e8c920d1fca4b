//! # bridge-gateway
//!
//! WebSocket signaling relay that brokers voice calls between registered peers.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use server::run;
