// ovenwatch-api: async client for the pizzeria `/api/stats` endpoint

pub mod client;
pub mod error;
pub mod transport;
pub mod wire;

pub use client::{StatsClient, decode};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use wire::{
    Restrictions, RichPayload, SnapshotShape, WireCounters, WireIngredients, WirePayload,
    WireStation,
};
