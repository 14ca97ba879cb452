mod identity;
mod input_surface;
mod messages;
mod prompt;
mod query;

pub use identity::*;
pub use input_surface::*;
pub use messages::*;
pub use prompt::*;
pub use query::*;
