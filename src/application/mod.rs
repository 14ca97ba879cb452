//! # Application Layer
//!
//! The submit use case and the transport port it drives.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
