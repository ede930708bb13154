//! MDX Wrapper Header
//!
//! Wrapper modules generated for MDX pages carry a small header:
//!
//! ```text
//! // gatsby-mdx wrapper
//! // /abs/path/to/page.mdx
//! // /url/path/
//! // hash 0123456789abcdef0123456789abcdef
//! ```
//!
//! The url path line may be missing; such a wrapper is still processed, just
//! without a page to take the query context from.
//!
//! The fields are separated by [`HEADER_DELIMITER`] with no escaping, so a
//! path that itself contains `"\n// "` produces a corrupt header. That is a
//! known limitation of the format.

use crate::constants::{HASH_MARKER, HEADER_DELIMITER, WRAPPER_START};
use crate::error::LoaderError;
use std::path::{Path, PathBuf};

/// The identifying fields of a wrapper module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperHeader {
    pub original_file: PathBuf,
    pub url_path: Option<String>,
}

impl WrapperHeader {
    pub fn new(original_file: impl Into<PathBuf>, url_path: impl Into<String>) -> Self {
        Self {
            original_file: original_file.into(),
            url_path: Some(url_path.into()),
        }
    }

    pub fn without_url_path(original_file: impl Into<PathBuf>) -> Self {
        Self {
            original_file: original_file.into(),
            url_path: None,
        }
    }

    /// Returns `None` when `content` is not a wrapper module at all.
    pub fn parse(content: &str, resource: &Path) -> Option<Result<Self, LoaderError>> {
        let rest = content.strip_prefix(WRAPPER_START)?;
        let mut fields = rest.split(HEADER_DELIMITER).skip(1);

        let header = match fields.next() {
            Some(file) if !file.is_empty() => Ok(Self {
                original_file: PathBuf::from(file),
                url_path: fields.next().map(str::to_string),
            }),
            _ => Err(LoaderError::MalformedWrapper {
                resource: resource.to_path_buf(),
                reason: "expected the original file after the wrapper marker".to_string(),
            }),
        };
        Some(header)
    }

    /// Render the header as written into a fresh wrapper module.
    pub fn render(&self) -> String {
        let mut header = format!(
            "{}{}{}",
            WRAPPER_START,
            HEADER_DELIMITER,
            self.original_file.display()
        );
        if let Some(url_path) = &self.url_path {
            header.push_str(HEADER_DELIMITER);
            header.push_str(url_path);
        }
        header
    }
}

/// The digest cached after the first hash marker, if any.
pub fn stored_digest(content: &str) -> Option<&str> {
    content.split(HASH_MARKER).nth(1)
}

/// Replace everything from the first hash marker on with a fresh marker.
pub fn with_digest(content: &str, digest: &str) -> String {
    let head = content.split(HASH_MARKER).next().unwrap_or_default();
    format!("{}{}{}", head, HASH_MARKER, digest)
}
