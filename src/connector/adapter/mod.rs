mod http_query_transport;
mod mock_query_transport;

pub use http_query_transport::*;
pub use mock_query_transport::*;
