pub mod container;
pub mod controller;
pub mod stub_server;

pub use container::{Container, ContainerConfig};
pub use controller::AskController;
pub use stub_server::{serve, stub_router, StubServerConfig};
