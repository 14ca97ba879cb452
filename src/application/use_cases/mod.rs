mod submit_query;

pub use submit_query::*;
