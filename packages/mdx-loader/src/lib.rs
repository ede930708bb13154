#![deny(clippy::all)]

//! Gatsby MDX Loader - Rust Implementation
//!
//! Rewrites MDX page wrappers so that scope values returned by the page query
//! become importable identifiers inside the rendered MDX body.

pub mod config;
pub mod constants;
pub mod emitter;
pub mod error;
pub mod hash;
pub mod host;
pub mod loader;
pub mod logging;
pub mod page_query;
pub mod parser;
pub mod scopes;
pub mod syntax;
pub mod testing;
pub mod wrapper;

pub use config::LoaderOptions;
pub use error::{LoaderError, ParseError, QueryError};
pub use host::LoaderHost;
pub use loader::{LoaderOutput, MdxScopeLoader, Outcome};
