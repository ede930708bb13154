//! Loader Errors
//!
//! Only failures the host build step must see are modelled as `LoaderError`.
//! Missing queries, missing scopes and unparsable sources are outcomes, not
//! errors (see [`crate::loader::Outcome`]).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure that aborts the loader for a single wrapper module.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("malformed MDX wrapper {resource}: {reason}")]
    MalformedWrapper { resource: PathBuf, reason: String },

    #[error("failed to read original MDX file {path}: {source}")]
    ReadOriginal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to update digest marker in {path}: {source}")]
    WriteWrapper {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("page query for {path} failed: {source}")]
    Query {
        path: PathBuf,
        #[source]
        source: QueryError,
    },
}

/// A syntax error reported by a [`crate::parser::SourceParser`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{filename}: {message}")]
pub struct ParseError {
    pub filename: String,
    pub message: String,
}

impl ParseError {
    pub fn new(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            message: message.into(),
        }
    }
}

/// A failure raised by the query engine.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    Execution(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
