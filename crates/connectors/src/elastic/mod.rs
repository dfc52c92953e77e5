pub mod client;
pub mod compiler;
pub mod post;
pub mod query;

pub use client::{ElasticClient, SearchBackend};
pub use compiler::ElasticFilterCompiler;
pub use post::Post;
pub use query::ElasticQuery;
