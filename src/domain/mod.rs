//! # Domain Layer
//!
//! Prompt, identity and reply models, the bounded input surface, and the
//! query error taxonomy. Nothing here touches the network or the terminal.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
