//! # Connector Layer
//!
//! Everything that talks to the outside world:
//! - Query transports (HTTP via reqwest, plus an offline mock)
//! - The terminal panel hosting the input surface
//! - Wiring and the local stub endpoint

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::*;
