use clap::Subcommand;

use crate::connector::api::stub_server::{DEFAULT_STUB_PORT, DEFAULT_STUB_REPLY};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive panel (the default when no command is given)
    Tui,

    /// Send a single prompt and print the reply
    Ask {
        prompt: String,
    },

    /// Run a local stand-in for the inference endpoint
    StubServer {
        #[arg(short, long, default_value_t = DEFAULT_STUB_PORT)]
        port: u16,

        /// Text returned in the "res" field
        #[arg(long, default_value = DEFAULT_STUB_REPLY)]
        reply: String,

        /// Status code for every reply (e.g. 429 to test rate limiting)
        #[arg(long, default_value_t = 200)]
        status: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1
        #[arg(long)]
        public: bool,
    },
}
