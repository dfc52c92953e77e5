pub mod compiler;
pub mod elastic;
pub mod error;
pub mod opa;

pub use compiler::FilterCompiler;
pub use error::{PolicyError, SearchError};
